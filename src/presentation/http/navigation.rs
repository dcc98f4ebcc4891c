//! Navigation
//!
//! Site identity, the sidebar with its active-route rule, page headers and
//! the dashboard's quick links.

use axum::Json;
use axum::extract::Query;
use serde::{Deserialize, Serialize};

pub const SITE_NAME: &str = "Mobile Forensics Hub";
pub const SITE_DESCRIPTION: &str = "Android security evaluation using forensic techniques.";

/// Route the visitor lands on after logging in
pub const DASHBOARD_ROUTE: &str = "/dashboard";
/// Route of the login page
pub const LOGIN_ROUTE: &str = "/";

/// A sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub title: &'static str,
    pub href: &'static str,
}

pub const SIDEBAR_NAV: [NavItem; 5] = [
    NavItem { title: "Dashboard", href: DASHBOARD_ROUTE },
    NavItem { title: "Wipe Accuracy", href: "/wipe-accuracy" },
    NavItem { title: "Recovery Potential", href: "/recovery-potential" },
    NavItem { title: "Data Extraction", href: "/data-extraction" },
    NavItem { title: "Threat Detection", href: "/threat-detection" },
];

/// A dashboard shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickLink {
    pub title: &'static str,
    pub href: &'static str,
    pub description: &'static str,
}

pub const QUICK_LINKS: [QuickLink; 4] = [
    QuickLink {
        title: "Wipe Accuracy",
        href: "/wipe-accuracy",
        description: "Assess data wipe effectiveness.",
    },
    QuickLink {
        title: "Recovery Potential",
        href: "/recovery-potential",
        description: "Analyze data recovery chances.",
    },
    QuickLink {
        title: "Data Extraction",
        href: "/data-extraction",
        description: "Simulate mobile data extraction.",
    },
    QuickLink {
        title: "Threat Detection",
        href: "/threat-detection",
        description: "Scan data for potential threats.",
    },
];

/// Title and subtitle shown at the top of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageHeader {
    pub title: &'static str,
    pub description: &'static str,
}

const PAGE_HEADERS: [(&str, PageHeader); 6] = [
    (
        DASHBOARD_ROUTE,
        PageHeader {
            title: "Dashboard",
            description: "Welcome to Mobile Forensics Hub. Access tools and analysis below.",
        },
    ),
    (
        "/wipe-accuracy",
        PageHeader {
            title: "Wipe Accuracy Assessment",
            description: "Upload data wipe logs to assess the accuracy of the data wipe process.",
        },
    ),
    (
        "/recovery-potential",
        PageHeader {
            title: "Recovery Potential Analysis",
            description: "Upload device image and details to assess data recovery potential.",
        },
    ),
    (
        "/forensic-simulation",
        PageHeader {
            title: "Forensic Simulation: File Wipe & Recovery",
            description: "Simulate wiping a file from a device and then attempt to recover its content.",
        },
    ),
    (
        "/data-extraction",
        PageHeader {
            title: "Data Extraction",
            description: "Simulate the mobile data extraction process and view mock results.",
        },
    ),
    (
        "/threat-detection",
        PageHeader {
            title: "Threat Detection",
            description: "Analyze extracted mobile data for viruses, malware, and vulnerabilities.",
        },
    ),
];

/// Whether the sidebar entry `href` is highlighted on `path`
///
/// The dashboard only matches exactly; every other entry also matches its
/// sub-paths and query strings.
pub fn is_active(path: &str, href: &str) -> bool {
    path == href || (href != DASHBOARD_ROUTE && path.starts_with(href))
}

/// Header of the page at `path`, ignoring any query string
pub fn page_header(path: &str) -> Option<PageHeader> {
    let route = path.split_once('?').map_or(path, |(route, _)| route);
    PAGE_HEADERS
        .iter()
        .find(|(href, _)| *href == route)
        .map(|(_, header)| *header)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarEntry {
    #[serde(flatten)]
    pub item: NavItem,
    pub active: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationView {
    pub site_name: &'static str,
    pub site_description: &'static str,
    pub sidebar: Vec<SidebarEntry>,
    pub header: Option<PageHeader>,
    /// Only filled on the dashboard
    pub quick_links: Vec<QuickLink>,
}

impl NavigationView {
    pub fn for_path(path: &str) -> Self {
        let sidebar = SIDEBAR_NAV
            .iter()
            .map(|item| SidebarEntry {
                item: *item,
                active: is_active(path, item.href),
            })
            .collect();
        let quick_links = if path == DASHBOARD_ROUTE {
            QUICK_LINKS.to_vec()
        } else {
            Vec::new()
        };

        Self {
            site_name: SITE_NAME,
            site_description: SITE_DESCRIPTION,
            sidebar,
            header: page_header(path),
            quick_links,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    #[serde(default)]
    pub path: Option<String>,
}

/// `GET /api/navigation?path=`
pub async fn navigation(Query(query): Query<NavigationQuery>) -> Json<NavigationView> {
    let path = query.path.as_deref().unwrap_or(DASHBOARD_ROUTE);
    Json(NavigationView::for_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_matches_exactly() {
        assert!(is_active("/dashboard", "/dashboard"));
        assert!(!is_active("/dashboard/extra", "/dashboard"));
    }

    #[test]
    fn tools_match_sub_paths() {
        assert!(is_active("/threat-detection?extractedData=x", "/threat-detection"));
        assert!(!is_active("/wipe-accuracy", "/threat-detection"));
    }

    #[test]
    fn headers_ignore_query() {
        let header = page_header("/data-extraction?source=simulation").unwrap();
        assert_eq!(header.title, "Data Extraction");
        assert!(page_header("/nowhere").is_none());
    }

    #[test]
    fn only_dashboard_lists_quick_links() {
        assert_eq!(NavigationView::for_path("/dashboard").quick_links.len(), 4);
        assert!(NavigationView::for_path("/wipe-accuracy").quick_links.is_empty());
    }
}
