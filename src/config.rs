//! Conversion profile: the binding-name contract shared by every pass and the
//! lookup tables each pass consults.
//!
//! Passes never spell these names themselves. A target other than Expo can be
//! described by loading a different profile from JSON.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{ConvertError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// WELL-KNOWN NAMES
// ═══════════════════════════════════════════════════════════════════════════════

/// Identifiers and module specifiers that one pass introduces and another relies on.
///
/// `router_binding` is what the hook pass binds and what the markup pass calls into;
/// `styles_binding` is what class lists reference and what the stylesheet pass emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WellKnownNames {
    pub base_module: String,
    pub web_router_module: String,
    pub platform_router_module: String,
    pub platform_ui_module: String,
    pub navigation_hook: String,
    pub router_hook: String,
    pub router_binding: String,
    pub navigate_member: String,
    pub styles_binding: String,
    pub stylesheet_api: String,
    pub stylesheet_create: String,
    pub secure_store_module: String,
    pub secure_store_namespace: String,
    pub font_module: String,
    pub font_hook: String,
    pub fonts_loaded_binding: String,
    pub web_storage: String,
    pub pressable_component: String,
    pub text_input_component: String,
    pub class_attribute: String,
    pub style_attribute: String,
    pub click_attribute: String,
    pub press_attribute: String,
    pub change_attribute: String,
    pub change_text_attribute: String,
}

impl Default for WellKnownNames {
    fn default() -> Self {
        WellKnownNames {
            base_module: "react".to_string(),
            web_router_module: "react-router-dom".to_string(),
            platform_router_module: "expo-router".to_string(),
            platform_ui_module: "react-native".to_string(),
            navigation_hook: "useNavigate".to_string(),
            router_hook: "useRouter".to_string(),
            router_binding: "router".to_string(),
            navigate_member: "navigate".to_string(),
            styles_binding: "styles".to_string(),
            stylesheet_api: "StyleSheet".to_string(),
            stylesheet_create: "create".to_string(),
            secure_store_module: "expo-secure-store".to_string(),
            secure_store_namespace: "SecureStore".to_string(),
            font_module: "expo-font".to_string(),
            font_hook: "useFonts".to_string(),
            fonts_loaded_binding: "fontsLoaded".to_string(),
            web_storage: "localStorage".to_string(),
            pressable_component: "TouchableOpacity".to_string(),
            text_input_component: "TextInput".to_string(),
            class_attribute: "className".to_string(),
            style_attribute: "style".to_string(),
            click_attribute: "onClick".to_string(),
            press_attribute: "onPress".to_string(),
            change_attribute: "onChange".to_string(),
            change_text_attribute: "onChangeText".to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOOKUP TABLES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFace {
    pub family: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionTables {
    /// Web tag → platform component
    pub tag_map: HashMap<String, String>,
    /// CSS property → platform property; an empty target drops the property
    pub property_renames: HashMap<String, String>,
    /// camelCased properties accepted when no rename entry exists
    pub allowed_properties: HashSet<String>,
    /// Platform components whose use as a tag requires an import
    pub recognized_components: Vec<String>,
    /// Platform identifiers whose bare reference requires an import
    pub referenced_identifiers: Vec<String>,
    pub stylesheet_extensions: Vec<String>,
    pub image_extensions: Vec<String>,
    pub asset_directory: String,
    /// Web storage methods forwarded to the secure store
    pub storage_methods: Vec<String>,
    pub font_faces: Vec<FontFace>,
    /// Function declarations that receive the font-loading hook call
    pub font_targets: Vec<String>,
    /// Source text of the type declaration placed after the imports
    pub type_declaration: String,
}

const DEFAULT_TYPE_DECLARATION: &str = r#"interface Transaction {
  type: "deposit" | "withdraw" | "message";
  amount: number;
  timeSpan: string;
  direction: "incoming" | "outgoing";
  description: string | undefined;
  message: {
    content: string;
  } | undefined;
}"#;

fn string_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ConversionTables {
    fn default() -> Self {
        let tag_map = string_map(&[
            ("div", "View"),
            ("button", "TouchableOpacity"),
            ("img", "Image"),
            ("span", "Text"),
            ("input", "TextInput"),
        ]);

        let property_renames = string_map(&[
            ("background", "background"),
            ("background-color", "backgroundColor"),
            ("color", "color"),
            ("display", "display"),
            ("font-size", "fontSize"),
            ("font-family", "fontFamily"),
            ("font-weight", "fontWeight"),
            ("flex-direction", "flexDirection"),
            ("justify-content", "justifyContent"),
            ("justify-items", "justifyItems"),
            ("align-items", "alignItems"),
            ("padding", "padding"),
            ("padding-top", "paddingTop"),
            ("padding-bottom", "paddingBottom"),
            ("padding-left", "paddingLeft"),
            ("padding-right", "paddingRight"),
            ("margin", "margin"),
            ("margin-top", "marginTop"),
            ("margin-bottom", "marginBottom"),
            ("margin-left", "marginLeft"),
            ("margin-right", "marginRight"),
            ("border-radius", "borderRadius"),
            ("border", "border"),
            ("height", "height"),
            ("width", "width"),
            ("position", "position"),
            ("top", "top"),
            ("left", "left"),
            ("right", "right"),
            ("bottom", "bottom"),
            ("cursor", ""),
        ]);

        let allowed_properties = [
            "display",
            "flex",
            "flexDirection",
            "maxWidth",
            "maxHeight",
            "backgroundColor",
            "background",
            "color",
            "fontSize",
            "fontFamily",
            "fontWeight",
            "justifyContent",
            "justifyItems",
            "alignItems",
            "padding",
            "paddingTop",
            "paddingBottom",
            "paddingLeft",
            "paddingRight",
            "margin",
            "marginTop",
            "marginBottom",
            "marginLeft",
            "marginRight",
            "borderRadius",
            "border",
            "height",
            "width",
            "position",
            "top",
            "left",
            "right",
            "bottom",
            "textAlign",
            "minWidth",
            "minHeight",
            "overflowY",
            "boxShadow",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let font_faces = ["Regular", "Light", "Medium", "Bold"]
            .iter()
            .map(|weight| FontFace {
                family: format!("Poppins-{}", weight),
                path: format!("../assets/fonts/Poppins-{}.ttf", weight),
            })
            .collect();

        ConversionTables {
            tag_map,
            property_renames,
            allowed_properties,
            recognized_components: strings(&[
                "View",
                "Text",
                "TextInput",
                "TouchableOpacity",
                "FlatList",
                "ScrollView",
                "Alert",
                "Image",
            ]),
            referenced_identifiers: strings(&["Alert", "FlatList", "StyleSheet"]),
            stylesheet_extensions: strings(&[".css"]),
            image_extensions: strings(&[".svg", ".png", ".jpg", ".jpeg", ".gif", ".webp"]),
            asset_directory: "../assets/images".to_string(),
            storage_methods: strings(&["getItem"]),
            font_faces,
            font_targets: strings(&["WalletScreen", "Balance"]),
            type_declaration: DEFAULT_TYPE_DECLARATION.to_string(),
        }
    }
}

impl ConversionTables {
    pub fn is_stylesheet_specifier(&self, specifier: &str) -> bool {
        self.stylesheet_extensions
            .iter()
            .any(|ext| specifier.ends_with(ext.as_str()))
    }

    pub fn is_image_specifier(&self, specifier: &str) -> bool {
        self.image_extensions
            .iter()
            .any(|ext| specifier.ends_with(ext.as_str()))
    }

    pub fn is_recognized_component(&self, name: &str) -> bool {
        self.recognized_components.iter().any(|c| c == name)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONVERTER CONFIG
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConverterConfig {
    pub names: WellKnownNames,
    pub tables: ConversionTables,
}

impl ConverterConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConvertError::Config(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tag_map_covers_web_tags() {
        let tables = ConversionTables::default();
        assert_eq!(tables.tag_map.get("div").map(String::as_str), Some("View"));
        assert_eq!(
            tables.tag_map.get("button").map(String::as_str),
            Some("TouchableOpacity")
        );
        assert_eq!(tables.tag_map.get("img").map(String::as_str), Some("Image"));
        assert_eq!(tables.tag_map.get("span").map(String::as_str), Some("Text"));
        assert_eq!(
            tables.tag_map.get("input").map(String::as_str),
            Some("TextInput")
        );
    }

    #[test]
    fn test_pressable_and_text_input_are_mapped_targets() {
        let config = ConverterConfig::default();
        let targets: HashSet<&String> = config.tables.tag_map.values().collect();
        assert!(targets.contains(&config.names.pressable_component));
        assert!(targets.contains(&config.names.text_input_component));
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let config = ConverterConfig::from_json_str(
            r#"{ "names": { "routerBinding": "nav" }, "tables": { "assetDirectory": "./img" } }"#,
        )
        .unwrap();
        assert_eq!(config.names.router_binding, "nav");
        assert_eq!(config.names.styles_binding, "styles");
        assert_eq!(config.tables.asset_directory, "./img");
        assert_eq!(config.tables.tag_map.len(), 5);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = ConverterConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn test_extension_checks() {
        let tables = ConversionTables::default();
        assert!(tables.is_stylesheet_specifier("./App.css"));
        assert!(!tables.is_stylesheet_specifier("./App.tsx"));
        assert!(tables.is_image_specifier("../icons/logo.svg"));
        assert!(!tables.is_image_specifier("react-native"));
    }
}
