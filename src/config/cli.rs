use crate::domain::model::TemplateApplyProperties;
use crate::utils::error::{DomainConnectError, Result};
use crate::utils::validation::{validate_url, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "domain-connect")]
#[command(about = "Discover a domain's Domain Connect provider and build template apply URLs")]
pub struct CliConfig {
    /// Domain to discover, e.g. example.org
    pub domain: String,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the provider host from the _domainconnect TXT record
    Provider,
    /// Print the provider settings as JSON
    Settings,
    /// Ask the provider whether it supports a template
    Query(TemplateArgs),
    /// Print the synchronous apply URL for a template
    ApplyUrl(ApplyArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct TemplateArgs {
    #[arg(long)]
    pub provider_id: String,

    #[arg(long)]
    pub service_id: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    #[arg(long)]
    pub redirect_uri: String,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub provider_name: Option<String>,

    #[arg(long)]
    pub service_name: Option<String>,

    #[arg(long)]
    pub sig: Option<String>,

    /// Template variable as key=value, may be repeated
    #[arg(long = "var", value_parser = parse_key_value)]
    pub variables: Vec<(String, String)>,
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

impl ApplyArgs {
    pub fn properties(&self) -> TemplateApplyProperties {
        let mut properties = TemplateApplyProperties::new(self.redirect_uri.clone());
        properties
            .set(TemplateApplyProperties::HOST, self.host.clone())
            .set(TemplateApplyProperties::STATE, self.state.clone())
            .set(TemplateApplyProperties::PROVIDER_NAME, self.provider_name.clone())
            .set(TemplateApplyProperties::SERVICE_NAME, self.service_name.clone())
            .set(TemplateApplyProperties::SIG, self.sig.clone());
        properties.extend(
            self.variables
                .iter()
                .map(|(key, value)| (key.clone(), Some(value.clone()))),
        );
        properties
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() || self.domain.contains(['/', ' ']) {
            return Err(DomainConnectError::InvalidArgument {
                field: "domain".to_string(),
                value: self.domain.clone(),
                reason: "Expected a bare domain name".to_string(),
            });
        }
        if let Command::ApplyUrl(args) = &self.command {
            validate_url("redirect_uri", &args.redirect_uri)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_apply_url_command() {
        let config = CliConfig::try_parse_from([
            "domain-connect",
            "example.org",
            "apply-url",
            "--provider-id",
            "p1",
            "--service-id",
            "svc1",
            "--redirect-uri",
            "https://example.com/cb",
            "--state",
            "abc",
            "--var",
            "IP=192.0.2.1",
        ])
        .unwrap();

        assert!(config.validate().is_ok());
        let Command::ApplyUrl(args) = &config.command else {
            panic!("expected apply-url");
        };
        assert_eq!(args.template.provider_id, "p1");

        let properties = args.properties();
        let entries: Vec<(&str, &str)> = properties.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("redirect_uri", "https://example.com/cb"),
                ("state", "abc"),
                ("IP", "192.0.2.1"),
            ]
        );
    }

    #[test]
    fn test_rejects_malformed_variable() {
        let result = CliConfig::try_parse_from([
            "domain-connect",
            "example.org",
            "apply-url",
            "--provider-id",
            "p1",
            "--service-id",
            "svc1",
            "--redirect-uri",
            "https://example.com/cb",
            "--var",
            "novalue",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_redirect_uri() {
        let config = CliConfig::try_parse_from([
            "domain-connect",
            "example.org",
            "apply-url",
            "--provider-id",
            "p1",
            "--service-id",
            "svc1",
            "--redirect-uri",
            "not-a-url",
        ])
        .unwrap();
        assert!(config.validate().is_err());
    }
}
