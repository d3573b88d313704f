//! Transformer trait for data transformation

use eyre::Result;

/// Transformer trait for turning one value into another
///
/// Implementors define how a value changes shape between the extract
/// and load stages, e.g. unpacking an archive into a directory of files.
///
/// # Example
/// ```
/// use kaggle_duck::etl::Transformer;
/// use eyre::Result;
///
/// struct Uppercase;
///
/// impl Transformer for Uppercase {
///     type Input = String;
///     type Output = String;
///
///     fn transform(&self, input: Self::Input) -> Result<Self::Output> {
///         Ok(input.to_uppercase())
///     }
/// }
///
/// assert_eq!(Uppercase.transform("abc".to_string()).unwrap(), "ABC");
/// ```
pub trait Transformer: Send + Sync {
    /// Input type
    type Input: Send;

    /// Output type after transformation
    type Output: Send;

    /// Transform a single value
    ///
    /// # Errors
    /// Returns an error if transformation fails (I/O, format, etc.)
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;
}
