use crate::cmd::{config::ShsConfig, Cmd};
use crate::error::ShsError;
use crate::log_error;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use crypto_hash::{sha2, DigestX, Output};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// 一条待哈希消息的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Pipe,
    Str,
    File(PathBuf),
}

impl Source {
    pub fn label(&self) -> String {
        match self {
            Source::Pipe => "-".to_string(),
            Source::Str => "string".to_string(),
            Source::File(p) => p.display().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DigestRecord<'a> {
    algorithm: &'a str,
    source: String,
    digest: String,
}

/// 摘要的显示格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Render {
    pub prefix: bool,
    pub upper: bool,
    pub json: bool,
}

impl Render {
    pub fn new(m: &ArgMatches, config: &ShsConfig) -> Self {
        Self {
            prefix: m.get_flag("prefix"),
            upper: m.get_flag("upper") || config.upper,
            json: m.get_flag("json"),
        }
    }

    pub fn hex(&self, digest: &Output<dyn DigestX>) -> String {
        let prefix = if self.prefix { "0x" } else { "" };
        if self.upper {
            format!("{prefix}{digest:X}")
        } else {
            format!("{prefix}{digest:x}")
        }
    }

    pub fn line(
        &self,
        algorithm: &str,
        src: &Source,
        digest: &Output<dyn DigestX>,
    ) -> anyhow::Result<String> {
        let hex = self.hex(digest);

        if self.json {
            let record = DigestRecord {
                algorithm,
                source: src.label(),
                digest: hex,
            };
            return Ok(serde_json::to_string(&record)?);
        }

        Ok(match src {
            Source::File(p) => format!("{hex}  {}", p.display()),
            _ => hex,
        })
    }
}

fn common_cmd(name: &'static str) -> Command {
    Command::new(name)
        .arg(
            Arg::new("str")
                .value_name("STRING")
                .action(ArgAction::Set)
                .value_parser(value_parser!(String))
                .required(false)
                .help("hash string"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .required(false)
                .help("to specified the file path, every file is hashed separately"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("display prefix with `0x`"),
        )
        .arg(
            Arg::new("upper")
                .long("upper")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("display digest in upper case"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("display one json object per input"),
        )
}

fn check_size(src: &Source, size: u64, limit: usize) -> Result<(), ShsError> {
    if size > limit as u64 {
        Err(ShsError::InputTooLarge {
            input: src.label(),
            size,
            limit,
        })
    } else {
        Ok(())
    }
}

/// 擦除消息缓存
pub fn wipe(data: &mut Vec<u8>) {
    #[cfg(feature = "sec-zeroize")]
    zeroize::Zeroize::zeroize(data);
    #[cfg(not(feature = "sec-zeroize"))]
    data.clear();
}

/// 读取`reader`的全部数据, 最多读取`limit + 1`字节, 超过`limit`字节时返回`ShsError::InputTooLarge`
pub fn read_limited<R: Read>(reader: R, src: &Source, limit: usize) -> Result<Vec<u8>, ShsError> {
    let mut data = Vec::with_capacity(limit.min(8 * 1024));
    reader
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut data)
        .map_err(|e| ShsError::ReadFailed {
            path: src.label(),
            err: e.to_string(),
        })?;

    let size = data.len() as u64;
    if let Err(e) = check_size(src, size, limit) {
        wipe(&mut data);
        return Err(e);
    }

    Ok(data)
}

fn read_file(f: &Path, limit: usize) -> Result<Vec<u8>, ShsError> {
    if !f.exists() {
        return Err(ShsError::PathNotExist(f.display().to_string()));
    }

    if !f.is_file() {
        return Err(ShsError::NotAFile(f.display().to_string()));
    }

    let read_failed = |e: std::io::Error| ShsError::ReadFailed {
        path: f.display().to_string(),
        err: e.to_string(),
    };

    let src = Source::File(f.to_path_buf());
    let size = f.metadata().map_err(read_failed)?.len();
    check_size(&src, size, limit)?;

    // 文件可能在检查后增长
    let file = File::open(f).map_err(read_failed)?;
    read_limited(file, &src, limit)
}

fn hash_msg(
    h: &dyn DigestX,
    src: &Source,
    data: &[u8],
    limit: usize,
) -> anyhow::Result<Output<dyn DigestX>> {
    check_size(src, data.len() as u64, limit)?;
    let digest = h.digest_x(data).map_err(ShsError::from)?;

    log::debug!("hashed {} bytes from `{}`", data.len(), src.label());

    Ok(digest)
}

fn hash_file(h: &dyn DigestX, f: &Path, limit: usize) -> anyhow::Result<Output<dyn DigestX>> {
    let mut data = read_file(f, limit)?;
    let digest = hash_msg(h, &Source::File(f.to_path_buf()), &data, limit);
    wipe(&mut data);
    digest
}

/// 收集输入并逐条输出摘要, 任一输入失败时返回错误, 其余输入仍会被处理
fn common_run(
    h: &dyn DigestX,
    algorithm: &str,
    pipe: Option<&[u8]>,
    m: &ArgMatches,
) -> anyhow::Result<()> {
    let config = ShsConfig::config();
    let render = Render::new(m, config);
    let limit = config.max_input_size;

    let s = m.get_one::<String>("str");
    let files = m
        .get_many::<PathBuf>("file")
        .map(|x| x.cloned().collect::<Vec<_>>())
        .unwrap_or_default();

    log::debug!("{algorithm}: {} file(s)", files.len());

    let mut stdin_data = None;
    if pipe.is_none() && s.is_none() && files.is_empty() {
        log::debug!("no input specified, read from stdin");
        stdin_data = Some(read_limited(
            std::io::stdin().lock(),
            &Source::Pipe,
            limit,
        )?);
    }

    let mut msgs = Vec::with_capacity(2);
    if let Some(pipe) = pipe.or(stdin_data.as_deref()) {
        msgs.push((Source::Pipe, pipe));
    }
    if let Some(s) = s {
        msgs.push((Source::Str, s.as_bytes()));
    }

    let mut results = msgs
        .into_iter()
        .map(|(src, data)| {
            let d = hash_msg(h, &src, data, limit);
            (src, d)
        })
        .collect::<Vec<_>>();

    if let Some(data) = stdin_data.as_mut() {
        wipe(data);
    }

    if !files.is_empty() {
        log::debug!("hash files with {} threads", config.threads);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;

        let digests = pool.install(|| {
            files
                .par_iter()
                .map(|f| hash_file(h, f, limit))
                .collect::<Vec<_>>()
        });

        results.extend(files.into_iter().map(Source::File).zip(digests));
    }

    let (total, mut failed) = (results.len(), 0usize);
    for (src, d) in results {
        let line = d.and_then(|d| render.line(algorithm, &src, &d));
        match log_error(line) {
            Some(line) => println!("{line}"),
            None => failed += 1,
        }
    }

    anyhow::ensure!(failed == 0, "{failed} of {total} input(s) failed");

    Ok(())
}

macro_rules! impl_hash_cmd {
    ($([$TYPE: ident, $HASH: ty, $NAME: literal, $ALGO: literal]),+) => {
        $(
            #[derive(Default)]
            pub struct $TYPE<'a> {
                pipe: Option<&'a [u8]>,
            }

            impl<'a> $TYPE<'a> {
                pub fn new(pipe: Option<&'a [u8]>) -> Self {
                    Self { pipe }
                }
            }

            impl Cmd for $TYPE<'_> {
                const NAME: &'static str = $NAME;

                fn cmd() -> Command {
                    common_cmd(Self::NAME).about($ALGO)
                }

                fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
                    common_run(&<$HASH>::new(), $ALGO, self.pipe, m)
                }
            }
        )+

        /// 所有摘要算法的子命令, `pipe`为`--pipe`读取的标准输入
        #[derive(Default)]
        pub struct HashCmd<'a> {
            pipe: Option<&'a [u8]>,
        }

        impl<'a> HashCmd<'a> {
            pub fn new(pipe: Option<&'a [u8]>) -> Self {
                Self { pipe }
            }

            pub fn subcommands() -> Vec<Command> {
                vec![$($TYPE::cmd()),+]
            }

            /// `m`为包含算法子命令的匹配结果
            pub fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
                match m.subcommand() {
                    $(Some((name, m)) if name == $TYPE::NAME => $TYPE::new(self.pipe).run(m),)+
                    Some((other, _m)) => anyhow::bail!("not support the {other} hash algorithm"),
                    None => anyhow::bail!("need to specified the hash algorithm"),
                }
            }
        }
    };
}

impl_hash_cmd!(
    [SHA1Cmd, sha2::SHA1, "s1", "SHA-1"],
    [SHA2_224Cmd, sha2::SHA224, "s2-224", "SHA-224"],
    [SHA2_256Cmd, sha2::SHA256, "s2-256", "SHA-256"],
    [SHA2_384Cmd, sha2::SHA384, "s2-384", "SHA-384"],
    [SHA2_512Cmd, sha2::SHA512, "s2-512", "SHA-512"],
    [SHA2_512t224Cmd, sha2::SHA512T224, "s2-t-224", "SHA-512/224"],
    [SHA2_512t256Cmd, sha2::SHA512T256, "s2-t-256", "SHA-512/256"]
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::shs_cmd;

    fn tmp_file(name: &str, content: &[u8]) -> PathBuf {
        let p = std::env::temp_dir().join(format!("shs-hash-{}-{name}", std::process::id()));
        std::fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn render_hex() {
        let d = Output::<dyn DigestX>::from(vec![0x00u8, 0x0a, 0xbc, 0xff]);

        assert_eq!(Render::default().hex(&d), "000abcff");
        let r = Render {
            prefix: true,
            ..Default::default()
        };
        assert_eq!(r.hex(&d), "0x000abcff");
        let r = Render {
            upper: true,
            ..Default::default()
        };
        assert_eq!(r.hex(&d), "000ABCFF");
        let r = Render {
            prefix: true,
            upper: true,
            ..Default::default()
        };
        assert_eq!(r.hex(&d), "0x000ABCFF");
    }

    #[test]
    fn render_line() {
        let d = Output::<dyn DigestX>::from(vec![0xa9u8, 0x99]);
        let r = Render::default();

        assert_eq!(r.line("SHA-1", &Source::Str, &d).unwrap(), "a999");
        assert_eq!(
            r.line("SHA-1", &Source::File(PathBuf::from("a.txt")), &d)
                .unwrap(),
            "a999  a.txt"
        );

        let r = Render {
            json: true,
            ..Default::default()
        };
        let line = r
            .line("SHA-1", &Source::File(PathBuf::from("a.txt")), &d)
            .unwrap();
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(v["algorithm"], "SHA-1");
        assert_eq!(v["source"], "a.txt");
        assert_eq!(v["digest"], "a999");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&r.line("SHA-1", &Source::Pipe, &d).unwrap())
                .unwrap()["source"],
            "-"
        );
    }

    #[test]
    fn parse_args() {
        let m = shs_cmd()
            .try_get_matches_from([
                "shs", "-p", "s2-256", "abc", "-f", "a.txt", "--file", "b.txt", "--upper",
            ])
            .unwrap();
        assert!(m.get_flag("pipe"));

        let (name, sub) = m.subcommand().unwrap();
        assert_eq!(name, SHA2_256Cmd::NAME);
        assert_eq!(sub.get_one::<String>("str").unwrap(), "abc");
        assert_eq!(
            sub.get_many::<PathBuf>("file")
                .unwrap()
                .cloned()
                .collect::<Vec<_>>(),
            [PathBuf::from("a.txt"), PathBuf::from("b.txt")]
        );
        assert!(sub.get_flag("upper"));
        assert!(!sub.get_flag("prefix"));
        assert!(!sub.get_flag("json"));

        for name in ["s1", "s2-224", "s2-384", "s2-512", "s2-t-224", "s2-t-256"] {
            let m = shs_cmd().try_get_matches_from(["shs", name, "x"]).unwrap();
            assert_eq!(m.subcommand_name(), Some(name));
        }

        assert!(shs_cmd()
            .try_get_matches_from(["shs", "s3-256", "x"])
            .is_err());
    }

    #[test]
    fn read_file_errors() {
        let missing = std::env::temp_dir().join("shs-hash-not-exist");
        assert!(matches!(
            read_file(&missing, 1024),
            Err(ShsError::PathNotExist(_))
        ));
        assert!(matches!(
            read_file(&std::env::temp_dir(), 1024),
            Err(ShsError::NotAFile(_))
        ));

        let p = tmp_file("large", &[0x61; 16]);
        let res = read_file(&p, 15);
        let ok = read_file(&p, 16);
        std::fs::remove_file(&p).unwrap();

        assert!(matches!(
            res,
            Err(ShsError::InputTooLarge {
                size: 16,
                limit: 15,
                ..
            })
        ));
        assert_eq!(ok.unwrap(), [0x61; 16]);
    }

    #[test]
    fn read_limited_stops_at_limit() {
        let ok = read_limited(std::io::Cursor::new(vec![0x61u8; 4]), &Source::Pipe, 4);
        assert_eq!(ok.unwrap(), [0x61; 4]);

        let res = read_limited(std::io::Cursor::new(vec![0u8; 100]), &Source::Pipe, 4);
        assert!(matches!(
            res,
            Err(ShsError::InputTooLarge {
                size: 5,
                limit: 4,
                ..
            })
        ));

        // 无尽的输入也只会读取`limit + 1`字节
        let res = read_limited(std::io::repeat(0x61), &Source::Pipe, 1024);
        assert!(matches!(
            res,
            Err(ShsError::InputTooLarge {
                size: 1025,
                limit: 1024,
                ..
            })
        ));

        assert!(read_limited(std::io::empty(), &Source::Pipe, 0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn hash_sources() {
        let h = sha2::SHA1::new();

        let d = hash_msg(&h, &Source::Str, b"abc", 1024).unwrap();
        assert_eq!(
            Render::default().hex(&d),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert!(hash_msg(&h, &Source::Pipe, b"abc", 2).is_err());

        let p = tmp_file("abc", b"abc");
        let d = hash_file(&sha2::SHA256::new(), &p, 1024);
        std::fs::remove_file(&p).unwrap();
        assert_eq!(
            Render::default().hex(&d.unwrap()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn run_with_missing_file() {
        let m = shs_cmd()
            .try_get_matches_from(["shs", "s1", "abc", "-f", "/shs/not/exist"])
            .unwrap();
        assert!(HashCmd::new(None).run(&m).is_err());

        let m = shs_cmd()
            .try_get_matches_from(["shs", "s2-t-256", "abc"])
            .unwrap();
        assert!(HashCmd::new(Some(b"pipe".as_slice())).run(&m).is_ok());
    }
}
