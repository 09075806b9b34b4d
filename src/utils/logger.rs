use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("sector_flows=debug,info")
        } else {
            EnvFilter::new("sector_flows=info")
        }
    })
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// 結構化輸出，供批次排程收集日誌使用
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
