use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()>;
}

mod config;
pub use config::ShsConfig;

mod hash;
pub use hash::{
    read_limited, wipe, HashCmd, Render, SHA1Cmd, SHA2_224Cmd, SHA2_256Cmd, SHA2_384Cmd,
    SHA2_512Cmd, SHA2_512t224Cmd, SHA2_512t256Cmd, Source,
};

/// 顶层命令, 每个摘要算法是一个子命令
pub fn shs_cmd() -> Command {
    Command::new("shs")
        .version(env!("SHS_VERSION_INFO"))
        .about("secure hash standard digests")
        .arg(
            Arg::new("pipe")
                .long("pipe")
                .short('p')
                .action(ArgAction::SetTrue)
                .required(false)
                .help("read the message from stdin"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .required(false)
                .help("config file path, default `~/.shs/config.json`"),
        )
        .subcommands(HashCmd::subcommands())
}
