use chrono::{DateTime, Local};
use std::{process::Command, time::SystemTime};

fn exe_cmd(cmd: &mut Command) -> anyhow::Result<String> {
    let output = cmd.output()?;

    anyhow::ensure!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr).trim()
    );

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

fn git_info() -> anyhow::Result<String> {
    let commit = exe_cmd(Command::new("git").args(["log", "-n", "1", "--pretty=format:%H"]))?;
    let branch = exe_cmd(Command::new("git").args(["branch", "--show-current"]))?;

    Ok(format!("{}-{}", branch, &commit[..8.min(commit.len())]))
}

fn main() {
    let git = git_info().unwrap_or_else(|e| {
        println!("cargo:warning=git info unavailable: {e}");
        String::default()
    });

    println!(
        "cargo:rustc-env=SHS_VERSION_INFO={}-{}",
        env!("CARGO_PKG_VERSION"),
        DateTime::<Local>::from(SystemTime::now()).format("%Y/%m/%d-%H:%M:%S:%Z")
    );

    println!("cargo:rustc-env=SHS_GIT_INFO={}", git);
    println!("cargo:rerun-if-changed=build.rs");
}
