//! URL construction for the provider's template endpoints.

use crate::domain::model::TemplateApplyProperties;
use crate::utils::error::Result;
use crate::utils::validation::validate_path_segment;
use url::form_urlencoded;

fn template_path(service_provider_id: &str, service_id: &str) -> Result<String> {
    validate_path_segment("service_provider_id", service_provider_id)?;
    validate_path_segment("service_id", service_id)?;
    Ok(format!(
        "/v2/domainTemplates/providers/{}/services/{}",
        service_provider_id, service_id
    ))
}

/// `<url_api>/v2/domainTemplates/providers/<spid>/services/<sid>`
pub fn template_support_url(
    url_api: &str,
    service_provider_id: &str,
    service_id: &str,
) -> Result<String> {
    Ok(format!(
        "{}{}",
        url_api,
        template_path(service_provider_id, service_id)?
    ))
}

/// Encodes `properties` followed by `domain`.
///
/// Properties come out in insertion order, absent values are dropped, and a
/// caller supplied `domain` entry is replaced by the bound domain at the end.
pub fn apply_query(domain: &str, properties: Option<&TemplateApplyProperties>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let Some(properties) = properties {
        for (key, value) in properties.iter().filter(|(key, _)| *key != "domain") {
            serializer.append_pair(key, value);
        }
    }
    serializer.append_pair("domain", domain);
    serializer.finish()
}

/// `<url_sync_ux>/v2/domainTemplates/providers/<spid>/services/<sid>/apply?<query>`
pub fn apply_template_sync_url(
    url_sync_ux: &str,
    domain: &str,
    service_provider_id: &str,
    service_id: &str,
    properties: Option<&TemplateApplyProperties>,
) -> Result<String> {
    Ok(format!(
        "{}{}/apply?{}",
        url_sync_ux,
        template_path(service_provider_id, service_id)?,
        apply_query(domain, properties)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::DomainConnectError;

    #[test]
    fn test_apply_url_canonical_order() {
        let properties = TemplateApplyProperties::new("https://example.com/cb");
        let url = apply_template_sync_url(
            "https://sync.example",
            "example.org",
            "p1",
            "svc1",
            Some(&properties),
        )
        .unwrap();
        assert_eq!(
            url,
            "https://sync.example/v2/domainTemplates/providers/p1/services/svc1/apply?redirect_uri=https%3A%2F%2Fexample.com%2Fcb&domain=example.org"
        );
    }

    #[test]
    fn test_apply_url_without_properties() {
        let url = apply_template_sync_url("https://sync.example", "example.org", "p1", "svc1", None)
            .unwrap();
        assert_eq!(
            url,
            "https://sync.example/v2/domainTemplates/providers/p1/services/svc1/apply?domain=example.org"
        );
    }

    #[test]
    fn test_query_encodes_variables_and_skips_absent() {
        let mut properties = TemplateApplyProperties::new("https://example.com/cb?a=1&b=2")
            .with_variable("RANDOMTEXT", "shm:1234 & more")
            .with_host("www");
        properties.set("state", None);

        assert_eq!(
            apply_query("example.org", Some(&properties)),
            "redirect_uri=https%3A%2F%2Fexample.com%2Fcb%3Fa%3D1%26b%3D2&RANDOMTEXT=shm%3A1234+%26+more&host=www&domain=example.org"
        );
    }

    #[test]
    fn test_query_overrides_caller_domain() {
        let properties = TemplateApplyProperties::new("https://example.com/cb")
            .with_variable("domain", "attacker.example");
        assert_eq!(
            apply_query("example.org", Some(&properties)),
            "redirect_uri=https%3A%2F%2Fexample.com%2Fcb&domain=example.org"
        );
    }

    #[test]
    fn test_template_support_url() {
        let url = template_support_url(
            "https://api.provider.test",
            "exampleservice.domainconnect.org",
            "template1",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://api.provider.test/v2/domainTemplates/providers/exampleservice.domainconnect.org/services/template1"
        );
    }

    #[test]
    fn test_rejects_ids_that_break_the_path() {
        let err = template_support_url("https://api.provider.test", "p1/../x", "svc1").unwrap_err();
        assert!(matches!(
            err,
            DomainConnectError::InvalidArgument { ref field, .. } if field == "service_provider_id"
        ));
        assert!(apply_template_sync_url("https://sync.example", "example.org", "p1", "", None).is_err());
    }
}
