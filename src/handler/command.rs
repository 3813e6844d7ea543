//! Command-execution handlers
//!
//! The shell handlers format their parameter straight into a command line and
//! run it through `<shell> -c`. `process` skips the shell and hands the value
//! to `convert` as an argument, options included. Nothing is quoted or escaped.

use crate::config::FixtureConfig;
use crate::logger;
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Fixed body returned by `/backup`
pub const BACKUP_CONFIRMATION: &str = "Backup created";

/// Program run directly by `/process`
pub const CONVERT_PROGRAM: &str = "convert";

pub fn ping_command(host: &str) -> String {
    format!("ping -c 4 {host}")
}

pub fn backup_command(file: &str) -> String {
    format!("tar -czf backup.tar.gz {file}")
}

pub fn convert_command(input: &str) -> String {
    format!("convert {input} output.png")
}

pub fn list_command(directory: &str) -> String {
    format!("ls {directory}")
}

/// `<shell> -c <command_line>`, run from the configured working directory
fn shell(cfg: &FixtureConfig, route: &str, command_line: &str) -> Command {
    logger::log_sink(route, command_line);
    let mut cmd = Command::new(&cfg.shell);
    cmd.arg("-c").arg(command_line);
    if let Some(dir) = &cfg.work_dir {
        cmd.current_dir(dir);
    }
    cmd
}

/// `convert <file> output.png` without a shell; a leading `-` makes `file` an option
pub fn process_command(file: &str, cfg: &FixtureConfig) -> Command {
    logger::log_sink("process", &format!("{CONVERT_PROGRAM} {file} output.png"));
    let mut cmd = Command::new(CONVERT_PROGRAM);
    cmd.arg(file).arg("output.png");
    if let Some(dir) = &cfg.work_dir {
        cmd.current_dir(dir);
    }
    cmd
}

/// Exit code as text, `-1` when the shell was killed by a signal
fn exit_status_text(status: ExitStatus) -> String {
    status.code().unwrap_or(-1).to_string()
}

/// Run `ping` and report the shell's exit status; output goes to the server's own stdio
pub async fn ping(host: &str, cfg: &FixtureConfig) -> io::Result<String> {
    let status = shell(cfg, "ping", &ping_command(host))
        .stdin(Stdio::null())
        .status()
        .await?;
    Ok(exit_status_text(status))
}

/// Run `tar` and confirm, whatever the exit status was
pub async fn backup(file: &str, cfg: &FixtureConfig) -> io::Result<String> {
    shell(cfg, "backup", &backup_command(file))
        .stdin(Stdio::null())
        .status()
        .await?;
    Ok(BACKUP_CONFIRMATION.to_string())
}

/// Run `convert` and return stdout followed by stderr
pub async fn convert(input: &str, cfg: &FixtureConfig) -> io::Result<String> {
    let output = shell(cfg, "convert", &convert_command(input))
        .stdin(Stdio::null())
        .output()
        .await?;
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(text)
}

/// Run `convert` directly; the body is empty whatever the outcome
pub async fn process(file: &str, cfg: &FixtureConfig) -> io::Result<String> {
    process_command(file, cfg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await?;
    Ok(String::new())
}

/// Run `ls` and return its stdout
pub async fn list(directory: &str, cfg: &FixtureConfig) -> io::Result<String> {
    let output = shell(cfg, "list", &list_command(directory))
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
