//! The static item catalog
//!
//! The catalog is the complete, hand-authored table of items the registry
//! can distribute. It is read-only after construction and validated at load
//! time: names must be unique by basename and no item may list itself as a
//! dependency. Dependency cycles between items cannot be represented at all,
//! since each descriptor owns its nested dependencies.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::schema::{ItemDescriptor, ItemKind};

/// Packages every consuming project needs, installed by `init`
pub const MINIMUM_REQUIRED_PACKAGES: &[&str] =
    &["react-native-unistyles@2.20.0", "@radix-ui/colors"];

/// Foundational items installed by `init`, grouped by kind
///
/// These are the items almost every component depends on; installing them up
/// front keeps later `add` runs small.
pub const MINIMUM_REQUIRED_ITEMS: &[(ItemKind, &[&str])] = &[
    (ItemKind::Type, &["components.ts"]),
    (ItemKind::Style, &["tokens.ts", "themes.ts", "unistyles.ts"]),
    (ItemKind::Utility, &["composeRefs.ts", "genericForwardRef.ts"]),
    (ItemKind::Hook, &["useControllableState.ts"]),
];

/// A validated lookup table of item descriptors
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<ItemDescriptor>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate basenames and self-references
    pub fn new(items: Vec<ItemDescriptor>) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.basename().to_string()) {
                bail!(
                    "catalog contains more than one item named '{}'",
                    item.basename()
                );
            }
        }

        for item in &items {
            validate_no_self_reference(item)?;
            validate_dependencies_known(item, &seen)?;
        }

        Ok(Self { items })
    }

    /// Look up an item by name, optionally restricted to a kind
    ///
    /// Matching compares basenames (text before the first `.`), so both
    /// `Button` and `Button.tsx` find the same entry. With a kind filter, an
    /// item whose kind differs does not match at all.
    pub fn find(&self, name: &str, kind: Option<ItemKind>) -> Option<&ItemDescriptor> {
        let wanted = crate::schema::basename(name);
        self.items.iter().find(|item| {
            item.basename() == wanted && kind.map_or(true, |k| item.kind == k)
        })
    }

    /// Every descriptor in the catalog, no code attached
    pub fn items(&self) -> &[ItemDescriptor] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn validate_no_self_reference(item: &ItemDescriptor) -> Result<()> {
    if item
        .item_dependencies
        .iter()
        .any(|dep| dep.basename() == item.basename())
    {
        bail!("item '{}' lists itself as a dependency", item.name);
    }
    for dep in &item.item_dependencies {
        validate_no_self_reference(dep)?;
    }
    Ok(())
}

fn validate_dependencies_known(item: &ItemDescriptor, names: &HashSet<String>) -> Result<()> {
    for dep in &item.item_dependencies {
        if !names.contains(dep.basename()) {
            bail!(
                "item '{}' depends on '{}', which is not in the catalog",
                item.name,
                dep.name
            );
        }
        validate_dependencies_known(dep, names)?;
    }
    Ok(())
}

/// The built-in catalog, constructed once per process
pub fn builtin() -> &'static Catalog {
    static CATALOG: Lazy<Catalog> = Lazy::new(|| {
        Catalog::new(builtin_items()).expect("built-in catalog is valid")
    });
    &CATALOG
}

fn item(name: &str, kind: ItemKind) -> ItemDescriptor {
    ItemDescriptor {
        name: name.to_string(),
        kind,
        package_dependencies: Vec::new(),
        dev_package_dependencies: Vec::new(),
        item_dependencies: Vec::new(),
    }
}

fn packages(mut desc: ItemDescriptor, deps: &[&str]) -> ItemDescriptor {
    desc.package_dependencies = deps.iter().map(|d| d.to_string()).collect();
    desc
}

fn dev_packages(mut desc: ItemDescriptor, deps: &[&str]) -> ItemDescriptor {
    desc.dev_package_dependencies = deps.iter().map(|d| d.to_string()).collect();
    desc
}

fn requires(mut desc: ItemDescriptor, deps: &[&ItemDescriptor]) -> ItemDescriptor {
    desc.item_dependencies = deps.iter().map(|d| (*d).clone()).collect();
    desc
}

/// The hand-authored item table
///
/// Items are written in lower-to-higher dependency order within each kind:
/// items that depend on fewer others come first.
fn builtin_items() -> Vec<ItemDescriptor> {
    // Types
    let components_types = item("components.ts", ItemKind::Type);

    // Styles
    let tokens = item("tokens.ts", ItemKind::Style);
    let themes = requires(item("themes.ts", ItemKind::Style), &[&tokens]);
    let unistyles = requires(item("unistyles.ts", ItemKind::Style), &[&themes, &tokens]);

    // Utilities
    let compose_refs = item("composeRefs.ts", ItemKind::Utility);
    let generic_forward_ref = item("genericForwardRef.ts", ItemKind::Utility);

    // Hooks
    let use_controllable_state = item("useControllableState.ts", ItemKind::Hook);
    let use_insets = item("useInsets.ts", ItemKind::Hook);
    let use_screen_dimensions = item("useScreenDimensions.ts", ItemKind::Hook);
    let use_positioning = requires(
        item("usePositioning.ts", ItemKind::Hook),
        &[&use_insets, &use_screen_dimensions],
    );

    // Components
    let portal = item("Portal.tsx", ItemKind::Component);
    let text_area = item("TextArea.tsx", ItemKind::Component);
    let spinner = packages(
        item("Spinner.tsx", ItemKind::Component),
        &["react-native-reanimated", "react-native-svg"],
    );
    let icon = requires(
        dev_packages(
            packages(
                item("Icon.tsx", ItemKind::Component),
                &[
                    "@react-native-vector-icons/common",
                    "@react-native-vector-icons/ionicons",
                ],
            ),
            &["@types/react-native-vector-icons"],
        ),
        &[&tokens],
    );
    let separator = requires(
        item("Separator.tsx", ItemKind::Component),
        &[&generic_forward_ref, &components_types],
    );
    let text_input = requires(
        item("TextInput.tsx", ItemKind::Component),
        &[&generic_forward_ref, &components_types],
    );
    let text = requires(
        item("Text.tsx", ItemKind::Component),
        &[&generic_forward_ref, &components_types, &tokens],
    );
    let collapsible = packages(
        requires(
            item("Collapsible.tsx", ItemKind::Component),
            &[&use_controllable_state, &generic_forward_ref, &components_types],
        ),
        &["react-native-reanimated"],
    );
    let radio_group = requires(
        item("RadioGroup.tsx", ItemKind::Component),
        &[&use_controllable_state, &generic_forward_ref, &components_types],
    );
    let accordion = packages(
        requires(
            item("Accordion.tsx", ItemKind::Component),
            &[
                &use_controllable_state,
                &generic_forward_ref,
                &components_types,
                &tokens,
            ],
        ),
        &["react-native-reanimated"],
    );
    let alert = requires(
        item("Alert.tsx", ItemKind::Component),
        &[&text, &icon, &generic_forward_ref, &components_types, &tokens],
    );
    let avatar = requires(
        item("Avatar.tsx", ItemKind::Component),
        &[&text, &icon, &generic_forward_ref, &components_types, &tokens],
    );
    let badge = requires(
        item("Badge.tsx", ItemKind::Component),
        &[&text, &icon, &generic_forward_ref, &components_types, &tokens],
    );
    let button = requires(
        item("Button.tsx", ItemKind::Component),
        &[&text, &icon, &generic_forward_ref, &components_types, &tokens],
    );
    let checkbox = requires(
        item("Checkbox.tsx", ItemKind::Component),
        &[
            &icon,
            &use_controllable_state,
            &generic_forward_ref,
            &components_types,
            &tokens,
        ],
    );
    let popup = packages(
        requires(
            item("Popup.tsx", ItemKind::Component),
            &[
                &portal,
                &use_controllable_state,
                &use_insets,
                &use_positioning,
                &use_screen_dimensions,
                &generic_forward_ref,
                &components_types,
            ],
        ),
        &["react-native-svg"],
    );
    let popover = packages(
        requires(
            item("Popover.tsx", ItemKind::Component),
            &[&popup, &generic_forward_ref],
        ),
        &["react-native-reanimated"],
    );
    let dialog = packages(
        requires(
            item("Dialog.tsx", ItemKind::Component),
            &[
                &text,
                &portal,
                &use_controllable_state,
                &use_insets,
                &use_screen_dimensions,
                &compose_refs,
                &generic_forward_ref,
                &components_types,
            ],
        ),
        &["react-native-reanimated"],
    );
    let dropdown_menu = packages(
        requires(
            item("DropdownMenu.tsx", ItemKind::Component),
            &[
                &checkbox,
                &icon,
                &popup,
                &radio_group,
                &separator,
                &text,
                &generic_forward_ref,
                &components_types,
                &tokens,
            ],
        ),
        &["react-native-reanimated"],
    );

    vec![
        components_types,
        tokens,
        themes,
        unistyles,
        compose_refs,
        generic_forward_ref,
        use_controllable_state,
        use_insets,
        use_screen_dimensions,
        use_positioning,
        portal,
        text_area,
        spinner,
        icon,
        separator,
        text_input,
        text,
        collapsible,
        radio_group,
        accordion,
        alert,
        avatar,
        badge,
        button,
        checkbox,
        popup,
        popover,
        dialog,
        dropdown_menu,
    ]
}

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = builtin();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_find_matches_basename() {
        let catalog = builtin();

        assert!(catalog.find("Toast.tsx", None).is_none()); // not in the table

        let full = catalog.find("Button.tsx", None).unwrap();
        let bare = catalog.find("Button", None).unwrap();
        assert_eq!(full.name, bare.name);
        // Extension on the query is ignored entirely
        assert!(catalog.find("Button.ts", None).is_some());
    }

    #[test]
    fn test_full_component_table() {
        let catalog = builtin();

        for name in [
            "Portal", "TextArea", "Spinner", "Icon", "Separator", "TextInput", "Text",
            "Collapsible", "RadioGroup", "Accordion", "Alert", "Avatar", "Badge", "Button",
            "Checkbox", "Popup", "Popover", "Dialog", "DropdownMenu",
        ] {
            assert!(
                catalog.find(name, Some(ItemKind::Component)).is_some(),
                "missing component {name}"
            );
        }
    }

    #[test]
    fn test_badge_and_button_depend_on_icon() {
        let catalog = builtin();

        for name in ["Badge", "Button"] {
            let desc = catalog.find(name, None).unwrap();
            assert!(
                desc.item_dependencies
                    .iter()
                    .any(|dep| dep.basename() == "Icon"),
                "{name} must depend on Icon"
            );
        }
    }

    #[test]
    fn test_overlay_components_carry_their_packages() {
        let catalog = builtin();

        let popup = catalog.find("Popup", None).unwrap();
        assert_eq!(popup.package_dependencies, vec!["react-native-svg"]);
        assert!(popup
            .item_dependencies
            .iter()
            .any(|dep| dep.basename() == "usePositioning"));

        for name in ["Popover", "Dialog", "DropdownMenu"] {
            let desc = catalog.find(name, None).unwrap();
            assert_eq!(
                desc.package_dependencies,
                vec!["react-native-reanimated"],
                "{name}"
            );
        }

        // DropdownMenu embeds Popup, which nests further hooks
        let dropdown = catalog.find("DropdownMenu", None).unwrap();
        assert!(dropdown
            .item_dependencies
            .iter()
            .any(|dep| dep.basename() == "Popup"));
    }

    #[test]
    fn test_find_with_kind_filter() {
        let catalog = builtin();

        assert!(catalog.find("tokens", Some(ItemKind::Style)).is_some());
        // Wrong kind behaves as not-found even though the name exists
        assert!(catalog.find("tokens", Some(ItemKind::Component)).is_none());
    }

    #[test]
    fn test_minimum_required_items_exist() {
        let catalog = builtin();

        for (kind, names) in MINIMUM_REQUIRED_ITEMS {
            for name in *names {
                assert!(
                    catalog.find(name, Some(*kind)).is_some(),
                    "missing required item {name}"
                );
            }
        }
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let items = vec![
            item("tokens.ts", ItemKind::Style),
            item("tokens.js", ItemKind::Utility),
        ];

        let err = Catalog::new(items).unwrap_err();
        assert!(err.to_string().contains("more than one item named 'tokens'"));
    }

    #[test]
    fn test_rejects_self_reference() {
        let mut desc = item("Portal.tsx", ItemKind::Component);
        desc.item_dependencies = vec![item("Portal.tsx", ItemKind::Component)];

        let err = Catalog::new(vec![desc]).unwrap_err();
        assert!(err.to_string().contains("lists itself"));
    }

    #[test]
    fn test_rejects_unknown_dependency() {
        let dep = item("missing.ts", ItemKind::Utility);
        let desc = requires(item("Portal.tsx", ItemKind::Component), &[&dep]);

        let err = Catalog::new(vec![desc]).unwrap_err();
        assert!(err.to_string().contains("not in the catalog"));
    }
}
