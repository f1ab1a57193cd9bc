#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

#[cfg(test)]
pub mod runner;
#[cfg(test)]
pub mod tests;

#[cfg(test)]
mod test_runner {
    use crate::execute_suite;
    use crate::runner::context::test_context::TestContext;
    use crate::runner::orchestration_utils::setup_tracing_and_panic_handling;
    use crate::tests::test_analyze::{
        test_analyze_caches_result, test_analyze_empty_url, test_analyze_garbled_model_output,
        test_analyze_missing_image, test_analyze_reattaches_query, test_analyze_url_named_batch,
        test_analyze_valid_image,
    };
    use crate::tests::test_batch::{test_batch_mixed_outcomes, test_batch_too_large};
    use crate::tests::test_root::{test_health_endpoint, test_openapi_document, test_root_banner};
    use color_eyre::Result;

    #[tokio::test]
    async fn integration_suite() -> Result<()> {
        setup_tracing_and_panic_handling();
        let context = TestContext::new().await?;

        execute_suite!(
            &context,
            [
                // -- Root --
                test_root_banner,
                test_health_endpoint,
                test_openapi_document,
                // -- Analyze --
                test_analyze_valid_image,
                test_analyze_caches_result,
                test_analyze_reattaches_query,
                test_analyze_missing_image,
                test_analyze_garbled_model_output,
                test_analyze_empty_url,
                test_analyze_url_named_batch,
                // -- Batch --
                test_batch_mixed_outcomes,
                test_batch_too_large,
            ]
        );

        Ok(())
    }
}
