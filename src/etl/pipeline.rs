//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};
use eyre::Result;

/// ETL Pipeline that runs Extract, Transform, and Load in sequence
///
/// Each stage blocks until complete before the next begins, and the first
/// error aborts the run.
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from E::Item)
/// - `L`: Loader type (must load T::Output)
///
/// # Example
/// ```no_run
/// use kaggle_duck::etl::Pipeline;
/// # use kaggle_duck::etl::{Extractor, Transformer, Loader};
/// # use async_trait::async_trait;
/// # use eyre::Result;
/// # struct MyExtractor;
/// # impl Extractor for MyExtractor {
/// #     type Item = i32;
/// #     async fn extract(&self) -> Result<Self::Item> { Ok(1) }
/// # }
/// # struct MyTransformer;
/// # impl Transformer for MyTransformer {
/// #     type Input = i32;
/// #     type Output = i32;
/// #     fn transform(&self, input: Self::Input) -> Result<Self::Output> { Ok(input) }
/// # }
/// # struct MyLoader;
/// # #[async_trait]
/// # impl Loader for MyLoader {
/// #     type Item = i32;
/// #     type Report = i32;
/// #     async fn load(&self, item: Self::Item) -> Result<Self::Report> { Ok(item) }
/// # }
///
/// # async fn example() -> Result<()> {
/// let pipeline = Pipeline::new(MyExtractor, MyTransformer, MyLoader);
///
/// let report = pipeline.run().await?;
/// println!("Loaded {}", report);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Item>,
    L: Loader<Item = T::Output>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract a value from the source
    /// 2. Transform it
    /// 3. Load the result into the destination
    ///
    /// Returns the loader's report
    ///
    /// # Errors
    /// Returns the first error raised by any stage
    pub async fn run(&self) -> Result<L::Report> {
        log::info!("Starting ETL pipeline");

        log::debug!("Extracting from source...");
        let extracted = self.extractor.extract().await?;
        log::info!("Extract stage complete");

        log::debug!("Transforming...");
        let transformed = self.transformer.transform(extracted)?;
        log::info!("Transform stage complete");

        log::debug!("Loading to destination...");
        let report = self.loader.load(transformed).await?;
        log::info!("Load stage complete");

        Ok(report)
    }
}
