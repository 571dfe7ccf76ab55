use clap::Parser;
use taphole_casting_toolbox::{app, cli::Cli, config, i18n, logging};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cfg = match config::load_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::warn!(error = %err, "설정을 읽지 못해 기본값을 사용한다");
            config::Config::default()
        }
    };
    let lang = i18n::resolve_language(cli.lang.as_deref(), cfg.language.as_deref());
    let tr = i18n::Translator::new_with_pack(&lang, &cli.locales);

    let out = app::Output {
        json: cli.json,
        tr: &tr,
    };
    if let Err(err) = app::run(cli.command, &cfg, out) {
        eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}
