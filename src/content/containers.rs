//! Filterable container grid assembled from fragment documents

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

use super::{markdown_files, read_document};
use crate::error::{Error, Result};

/// Front-matter keys every container fragment has to define
const CONTAINER_KEYS: [&str; 5] = [
    "containergroups",
    "containerimage",
    "containeralttext",
    "containerlink",
    "containertitle",
];

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// One grid item, read from the front matter of a fragment document
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContainerFragment {
    #[serde(rename = "containergroups", deserialize_with = "string_or_vec")]
    pub groups: Vec<String>,
    #[serde(rename = "containerimage")]
    pub image: String,
    #[serde(rename = "containeralttext")]
    pub alt_text: String,
    #[serde(rename = "containerlink")]
    pub link: String,
    #[serde(rename = "containertitle")]
    pub title: String,
}

impl ContainerFragment {
    /// Load a fragment, failing on the first missing container key
    pub fn load(path: &Path) -> Result<Self> {
        let (metadata, _) = read_document(path)?;

        let mut fields = serde_json::Map::new();
        for key in CONTAINER_KEYS {
            fields.insert(key.to_string(), metadata.require(key, path)?.clone());
        }

        serde_json::from_value(Value::Object(fields)).map_err(|e| Error::InvalidValue {
            key: "container".to_string(),
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Group list as embeddable JSON, e.g. `["a", "b"]`
    ///
    /// Non-ASCII group names are written as UTF-8, not `\uXXXX` escapes.
    fn groups_json(&self) -> String {
        let items: Vec<String> = self
            .groups
            .iter()
            .map(|g| Value::String(g.clone()).to_string())
            .collect();
        format!("[{}]", items.join(", "))
    }

    fn to_html(&self) -> String {
        format!(
            "\n\t\t\t\t<div class='item' data-groups='{groups}'>\
             \n\t\t\t\t\t<a href='{link}'>\
             \n\t\t\t\t\t\t<img src='{image}' alt='{alt}'  class='item_img'>\
             \n\t\t\t\t\t\t<div class='item_overlay'>\
             \n\t\t\t\t\t\t\t<div class='item_text'>\
             \n\t\t\t\t\t\t\t\t<h3>{title}</h3>\
             \n\t\t\t\t\t\t\t\t<p>{title}</p>\
             \n\t\t\t\t\t\t\t</div>\
             \n\t\t\t\t\t\t</div>\
             \n\t\t\t\t\t</a>\
             \n\t\t\t\t</div>",
            groups = self.groups_json(),
            link = self.link,
            image = self.image,
            alt = self.alt_text,
            title = self.title,
        )
    }
}

/// Build the filter buttons and item grid for a containers directory
///
/// Returns `Ok(None)` when the directory does not exist. Items follow the
/// directory listing; filter buttons are the sorted distinct groups after
/// the always-active "All" button.
pub fn assemble_containers(dir: &Path) -> Result<Option<String>> {
    if !dir.is_dir() {
        tracing::error!("Containers directory not found: {:?}", dir);
        return Ok(None);
    }

    tracing::info!("Generating containers HTML from {:?}", dir);

    let mut groups = BTreeSet::new();
    let mut items = String::new();

    for path in markdown_files(dir)? {
        let fragment = ContainerFragment::load(&path)?;
        groups.extend(fragment.groups.iter().cloned());
        items.push_str(&fragment.to_html());
    }

    let mut buttons =
        String::from("\n\t\t\t\t<button class=\"filter-btn active\" data-filter=\"all\">All</button>");
    for group in &groups {
        buttons.push_str(&format!(
            "\n\t\t\t\t<button class=\"filter-btn\" data-filter=\"{0}\">{0}</button>",
            group
        ));
    }

    Ok(Some(format!(
        "\n\t\t\t<div class=\"filter-buttons\">{}\n\t\t\t</div>\n\t\t\t<div class=\"items-container\">{}\n\t\t\t</div>",
        buttons, items
    )))
}
