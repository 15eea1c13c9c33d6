//! TLD to RDAP endpoint mappings.
//!
//! Templates contain a single `{}` placeholder that is replaced with the full
//! domain. Unknown TLDs fall back to the rdap.org redirector. The built-in
//! table is initialized once and never mutated.

use crate::utils::top_level_label;
use std::collections::HashMap;

/// Template used for TLDs that have no entry of their own.
pub const DEFAULT_RDAP_TEMPLATE: &str = "https://rdap.org/domain/{}";

lazy_static::lazy_static! {
    static ref RDAP_TEMPLATES: HashMap<&'static str, &'static str> = HashMap::from([
        // Popular gTLDs
        ("com", "https://rdap.verisign.com/com/v1/domain/{}"),
        ("net", "https://rdap.verisign.com/net/v1/domain/{}"),
        ("org", "https://rdap.publicinterestregistry.org/rdap/domain/{}"),
        ("info", "https://rdap.identitydigital.services/rdap/domain/{}"),
        ("biz", "https://rdap.nic.biz/domain/{}"),
        // Google
        ("app", "https://pubapi.registry.google/rdap/domain/{}"),
        ("dev", "https://pubapi.registry.google/rdap/domain/{}"),
        ("page", "https://pubapi.registry.google/rdap/domain/{}"),
        // CentralNic
        ("xyz", "https://rdap.centralnic.com/xyz/domain/{}"),
        ("tech", "https://rdap.centralnic.com/tech/domain/{}"),
        ("online", "https://rdap.centralnic.com/online/domain/{}"),
        ("site", "https://rdap.centralnic.com/site/domain/{}"),
        // Identity Digital
        ("ai", "https://rdap.identitydigital.services/rdap/domain/{}"),
        ("io", "https://rdap.identitydigital.services/rdap/domain/{}"),
        ("me", "https://rdap.identitydigital.services/rdap/domain/{}"),
        ("co", "https://rdap.nic.co/domain/{}"),
        ("cloud", "https://rdap.registry.cloud/rdap/domain/{}"),
        // ccTLDs
        ("us", "https://rdap.nic.us/domain/{}"),
        ("uk", "https://rdap.nominet.uk/domain/{}"),
        ("de", "https://rdap.denic.de/domain/{}"),
        ("ca", "https://rdap.ca.fury.ca/rdap/domain/{}"),
        ("fr", "https://rdap.nic.fr/domain/{}"),
        ("nl", "https://rdap.sidn.nl/domain/{}"),
        ("tv", "https://rdap.nic.tv/domain/{}"),
    ]);
}

/// Replace the `{}` placeholder of a template with a domain.
pub fn instantiate(template: &str, domain: &str) -> String {
    template.replacen("{}", domain, 1)
}

/// Built-in template for a TLD, or the default template.
pub fn template_for_tld(tld: &str) -> &'static str {
    RDAP_TEMPLATES
        .get(tld.to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_RDAP_TEMPLATE)
}

/// All TLDs with a dedicated endpoint, sorted alphabetically.
pub fn get_all_known_tlds() -> Vec<String> {
    let mut tlds: Vec<String> = RDAP_TEMPLATES.keys().map(|k| k.to_string()).collect();
    tlds.sort();
    tlds
}

/// Resolves domains to RDAP query URLs.
///
/// [`EndpointTable::builtin`] uses the static table. A custom fallback
/// template sends every unknown TLD elsewhere, and
/// [`EndpointTable::routed_to`] sends *every* domain to one template, which is
/// how tests point the client at a local server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTable {
    use_builtin: bool,
    overrides: HashMap<String, String>,
    fallback: String,
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EndpointTable {
    pub fn builtin() -> Self {
        Self {
            use_builtin: true,
            overrides: HashMap::new(),
            fallback: DEFAULT_RDAP_TEMPLATE.to_string(),
        }
    }

    /// A table that ignores the built-in entries and uses one template for everything.
    pub fn routed_to<T: Into<String>>(template: T) -> Self {
        Self {
            use_builtin: false,
            overrides: HashMap::new(),
            fallback: template.into(),
        }
    }

    /// Add or replace the template for one TLD.
    pub fn with_endpoint<T: Into<String>>(mut self, tld: &str, template: T) -> Self {
        self.overrides
            .insert(tld.trim_start_matches('.').to_lowercase(), template.into());
        self
    }

    /// Template for a TLD: overrides first, then the built-in table, then the fallback.
    pub fn template(&self, tld: &str) -> &str {
        let tld = tld.to_lowercase();
        if let Some(template) = self.overrides.get(&tld) {
            return template;
        }
        if self.use_builtin {
            if let Some(template) = RDAP_TEMPLATES.get(tld.as_str()) {
                return template;
            }
        }
        &self.fallback
    }

    /// Query URL for a domain; `None` when the domain has no top-level label.
    pub fn resolve(&self, domain: &str) -> Option<String> {
        let tld = top_level_label(domain)?;
        Some(instantiate(self.template(tld), domain))
    }
}
