use serde::{Deserialize, Deserializer};

///
/// Ticket request submitted by the form.
///
/// Missing and `null` fields deserialize to empty strings
/// so presence is validated together with other rules.
///
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticket {
    #[serde(deserialize_with = "null_as_empty")]
    pub vatin: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub last_name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    Ok(value.unwrap_or_default())
}
