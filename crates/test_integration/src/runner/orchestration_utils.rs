use color_eyre::Result;
use color_eyre::eyre::bail;
use colored::Colorize;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing_subscriber::{EnvFilter, fmt};

/// Run every listed test against the shared context, then fail if any of them failed.
#[macro_export]
macro_rules! execute_suite {
    ($context:expr, [ $($test_fn:ident),* $(,)? ]) => {{
        let mut outcomes = Vec::new();
        $(
            outcomes.push(
                $crate::runner::orchestration_utils::run_test(
                    stringify!($test_fn),
                    $test_fn($context),
                )
                .await,
            );
        )*
        $crate::runner::orchestration_utils::summarize(&outcomes)?;
    }};
}

pub struct TestOutcome {
    pub name: &'static str,
    pub elapsed: Duration,
    pub passed: bool,
}

pub async fn run_test<Fut>(name: &'static str, test: Fut) -> TestOutcome
where
    Fut: Future<Output = Result<()>>,
{
    println!("{} {}", " RUNNING ".on_cyan().black().bold(), name.cyan().bold());
    let start = Instant::now();
    let result = test.await;
    let elapsed = start.elapsed();

    match &result {
        Ok(()) => println!(
            "{} {} ({elapsed:.2?})",
            " PASSED ".on_green().black().bold(),
            name.green()
        ),
        Err(e) => println!(
            "{} {} ({elapsed:.2?})\n{e:?}",
            " FAILED ".on_red().black().bold(),
            name.red()
        ),
    }

    TestOutcome {
        name,
        elapsed,
        passed: result.is_ok(),
    }
}

pub fn summarize(outcomes: &[TestOutcome]) -> Result<()> {
    let passed = outcomes.iter().filter(|o| o.passed).count();
    let total: Duration = outcomes.iter().map(|o| o.elapsed).sum();
    println!("{}", "─".repeat(60).truecolor(80, 80, 80));
    println!(
        "{} {passed}/{} tests passed in {total:.2?}.",
        " SUMMARY ".on_purple().black().bold(),
        outcomes.len()
    );

    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.passed)
        .map(|o| o.name)
        .collect();
    if !failed.is_empty() {
        bail!("failed tests: {}", failed.join(", "));
    }
    Ok(())
}

pub fn setup_tracing_and_panic_handling() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "info,api=debug,common_services=debug,ml_analysis=debug,hyper=error,reqwest=error".into()
    });

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");
    color_eyre::install().expect("Failed to install color_eyre");
}
