//! Icon set
//!
//! A fixed table of icons, each registered as a component under its name
//! when the application boots.

/// Icon exported by the icon set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    pub name: &'static str,
    /// Inline SVG markup, 1em square, drawn with `currentColor`
    pub svg: &'static str,
}

macro_rules! icon {
    ($name:literal, $body:literal) => {
        Icon {
            name: $name,
            svg: concat!(
                r#"<svg class="el-icon" viewBox="0 0 24 24" width="1em" height="1em" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">"#,
                $body,
                "</svg>"
            ),
        }
    };
}

/// Every exported icon, in export order
pub static ICONS: &[Icon] = &[
    icon!("House", r#"<path d="M3 11l9-8 9 8"/><path d="M5 10v10h14V10"/>"#),
    icon!("Document", r#"<path d="M6 2h9l5 5v15H6z"/><path d="M14 2v6h6"/>"#),
    icon!("Upload", r#"<path d="M12 16V4"/><path d="M7 9l5-5 5 5"/><path d="M4 20h16"/>"#),
    icon!("Download", r#"<path d="M12 4v12"/><path d="M7 11l5 5 5-5"/><path d="M4 20h16"/>"#),
    icon!("Reading", r#"<path d="M2 5h7a3 3 0 0 1 3 3v12a2 2 0 0 0-2-2H2z"/><path d="M22 5h-7a3 3 0 0 0-3 3v12a2 2 0 0 1 2-2h8z"/>"#),
    icon!("EditPen", r#"<path d="M16 3l5 5L8 21H3v-5z"/>"#),
    icon!("Setting", r#"<circle cx="12" cy="12" r="3"/><path d="M12 2v3M12 19v3M2 12h3M19 12h3M4.9 4.9l2.1 2.1M17 17l2.1 2.1M4.9 19.1L7 17M17 7l2.1-2.1"/>"#),
    icon!("InfoFilled", r#"<circle cx="12" cy="12" r="10"/><path d="M12 16v-4M12 8h.01"/>"#),
    icon!("WarningFilled", r#"<path d="M12 3l10 18H2z"/><path d="M12 10v4M12 18h.01"/>"#),
    icon!("ArrowLeft", r#"<path d="M19 12H5"/><path d="M12 19l-7-7 7-7"/>"#),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_icon_names_unique() {
        let names: HashSet<_> = ICONS.iter().map(|i| i.name).collect();
        assert_eq!(names.len(), ICONS.len());
    }

    #[test]
    fn test_icons_are_svg() {
        for icon in ICONS {
            assert!(icon.svg.starts_with("<svg"), "{}", icon.name);
            assert!(icon.svg.ends_with("</svg>"), "{}", icon.name);
        }
    }
}
