use log::LevelFilter;
use shs::cmd::{read_limited, shs_cmd, wipe, HashCmd, ShsConfig, Source};
use std::path::PathBuf;

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let app = shs_cmd().get_matches();

    let config = match ShsConfig::init(app.get_one::<PathBuf>("config").map(|p| p.as_path())) {
        Ok(config) => config,
        Err(e) => {
            log::error!("load config failed, {e}");
            std::process::exit(1);
        }
    };
    log::debug!("{:?}", config);

    if app.subcommand().is_none() {
        println!(
            "{} {} {}",
            env!("CARGO_PKG_NAME"),
            env!("SHS_VERSION_INFO"),
            env!("SHS_GIT_INFO")
        );
        return;
    }

    let mut pipe = if app.get_flag("pipe") {
        match read_limited(
            std::io::stdin().lock(),
            &Source::Pipe,
            config.max_input_size,
        ) {
            Ok(pdata) => Some(pdata),
            Err(e) => {
                log::error!("read stdin failed, {e}");
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    let res = HashCmd::new(pipe.as_deref()).run(&app);

    if let Some(pdata) = pipe.as_mut() {
        wipe(pdata);
    }

    if let Err(e) = res {
        log::error!("{e}");
        std::process::exit(1);
    }
}
