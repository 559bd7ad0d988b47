//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "nxrm-admin")]
#[command(about = "Terminal admin console for cleanup policies, roles and LDAP servers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to `<config dir>/nxrm-admin/config.json`)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Use the built-in sample data instead of a server
    #[arg(long)]
    pub demo: bool,

    /// Log file (defaults to `<cache dir>/nxrm-admin/nxrm-admin.log`)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Store the password from `NXRM_ADMIN_PASSWORD` in the OS keyring
    #[arg(long)]
    pub remember_password: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from(["nxrm-admin", "--demo", "--config", "/tmp/admin.json"]);
        assert!(cli.demo);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/admin.json")));
        assert!(cli.log_file.is_none());
        assert!(!cli.remember_password);
    }
}
