//! Framework catalog and route resolution.
//!
//! Only GRI has an assessment; the other frameworks show a descriptive
//! placeholder. Unknown slugs redirect to the selector.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Framework {
    pub slug: &'static str,
    pub name: &'static str,
    pub short_name: &'static str,
    pub description: &'static str,
    pub has_assessment: bool,
}

// ============================================================================
// Catalog (selector order)
// ============================================================================

pub static FRAMEWORKS: &[Framework] = &[
    Framework {
        slug: "gri",
        name: "GRI Standards",
        short_name: "GRI",
        description: "Global Reporting Initiative standards for broad stakeholder-focused sustainability disclosure.",
        has_assessment: true,
    },
    Framework {
        slug: "issb",
        name: "ISSB (IFRS S1/S2)",
        short_name: "ISSB",
        description: "International Sustainability Standards Board framework for investor-focused financial materiality.",
        has_assessment: false,
    },
    Framework {
        slug: "csrd",
        name: "CSRD",
        short_name: "CSRD",
        description: "EU Corporate Sustainability Reporting Directive requiring double materiality assessment.",
        has_assessment: false,
    },
    Framework {
        slug: "esrs",
        name: "ESRS",
        short_name: "ESRS",
        description: "European Sustainability Reporting Standards implementing CSRD disclosure requirements.",
        has_assessment: false,
    },
    Framework {
        slug: "sbti",
        name: "SBTi",
        short_name: "SBTi",
        description: "Science Based Targets initiative for validated emissions reduction target-setting.",
        has_assessment: false,
    },
];

/// Path of the framework selector.
pub const SELECTOR_PATH: &str = "/";

pub fn find_framework(slug: &str) -> Option<&'static Framework> {
    FRAMEWORKS.iter().find(|f| f.slug == slug)
}

/// Local storage key of a framework's form data ("gri-form-data").
pub fn storage_key(slug: &str) -> String {
    format!("{}-form-data", slug)
}

/// Where a framework slug leads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "route", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Route {
    Assessment {
        framework: &'static Framework,
        storage_key: String,
    },
    Placeholder {
        framework: &'static Framework,
    },
    RedirectToSelector {
        to: &'static str,
    },
}

pub fn resolve_route(slug: &str) -> Route {
    match find_framework(slug) {
        Some(framework) if framework.has_assessment => Route::Assessment {
            framework,
            storage_key: storage_key(framework.slug),
        },
        Some(framework) => Route::Placeholder { framework },
        None => {
            tracing::debug!(slug, "Unknown framework, redirecting to selector");
            Route::RedirectToSelector { to: SELECTOR_PATH }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let slugs: Vec<&str> = FRAMEWORKS.iter().map(|f| f.slug).collect();
        assert_eq!(slugs, vec!["gri", "issb", "csrd", "esrs", "sbti"]);
        assert_eq!(FRAMEWORKS.iter().filter(|f| f.has_assessment).count(), 1);
    }

    #[test]
    fn test_resolve_route() {
        match resolve_route("gri") {
            Route::Assessment { framework, storage_key } => {
                assert_eq!(framework.name, "GRI Standards");
                assert_eq!(storage_key, "gri-form-data");
            }
            other => panic!("unexpected route {:?}", other),
        }
        assert!(matches!(resolve_route("csrd"), Route::Placeholder { framework } if framework.short_name == "CSRD"));
        assert_eq!(resolve_route("tcfd"), Route::RedirectToSelector { to: "/" });
        assert_eq!(resolve_route(""), Route::RedirectToSelector { to: "/" });
    }
}
