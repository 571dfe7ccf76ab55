//! tracing 구독자 초기화.

use tracing_subscriber::{fmt, EnvFilter};

/// 로그 시스템을 초기화한다.
///
/// `RUST_LOG`가 있으면 그 값을 따르고, 없으면 `verbose`에 따라 `debug` 또는 `warn`을 쓴다.
/// 계산 결과 표는 stdout, 로그는 stderr로 나간다.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(verbose)
        .with_writer(std::io::stderr)
        .init();
}

/// 테스트용 로그 초기화. 여러 번 호출해도 된다.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
