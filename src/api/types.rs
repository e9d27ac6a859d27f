use serde::{Deserialize, Deserializer};

/// Upstream sends `null` for fields a drink doesn't have; those render blank.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One cocktail as returned by the proxy.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DrinkRecord {
    #[serde(rename = "strDrink", default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(rename = "strDrinkThumb", default, deserialize_with = "nullable_string")]
    pub thumbnail_url: String,
    #[serde(rename = "strCategory", default, deserialize_with = "nullable_string")]
    pub category: String,
    #[serde(rename = "strAlcoholic", default, deserialize_with = "nullable_string")]
    pub alcoholic: String,
    #[serde(rename = "strInstructions", default, deserialize_with = "nullable_string")]
    pub instructions: String,
}

/// Top-level response of both endpoints.
///
/// `drinks` is `None` both when the key is missing and when it is `null`;
/// either way the result is rendered as "not found".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub drinks: Option<Vec<DrinkRecord>>,
}

impl Envelope {
    pub fn with_drinks(drinks: Vec<DrinkRecord>) -> Self {
        Self {
            drinks: Some(drinks),
        }
    }
}

/// Body the proxy attaches to 4xx/5xx answers.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn summary(&self) -> String {
        match &self.details {
            Some(details) => format!("{} ({})", self.error, details),
            None => self.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_envelope_in_order() {
        let json = r#"{"drinks":[
            {"idDrink":"11000","strDrink":"Mojito","strDrinkThumb":"https://img/mojito.jpg",
             "strCategory":"Cocktail","strAlcoholic":"Alcoholic","strInstructions":"Muddle mint."},
            {"strDrink":"Mojito Extra","strDrinkThumb":"b.png","strCategory":"Cocktail",
             "strAlcoholic":"Alcoholic","strInstructions":"Add more."}
        ]}"#;
        let env: Envelope = serde_json::from_str(json).unwrap();
        let drinks = env.drinks.unwrap();
        assert_eq!(drinks.len(), 2);
        assert_eq!(drinks[0].name, "Mojito");
        assert_eq!(drinks[0].thumbnail_url, "https://img/mojito.jpg");
        assert_eq!(drinks[0].instructions, "Muddle mint.");
        assert_eq!(drinks[1].name, "Mojito Extra");
    }

    #[test]
    fn missing_and_null_drinks_are_both_absent() {
        let missing: Envelope = serde_json::from_str("{}").unwrap();
        let null: Envelope = serde_json::from_str(r#"{"drinks":null}"#).unwrap();
        assert!(missing.drinks.is_none());
        assert!(null.drinks.is_none());
    }

    #[test]
    fn error_envelope_without_drinks_parses() {
        let env: Envelope =
            serde_json::from_str(r#"{"error":"No se proporcionó el nombre del cóctel"}"#).unwrap();
        assert!(env.drinks.is_none());
    }

    #[test]
    fn null_and_missing_fields_become_empty() {
        let env: Envelope =
            serde_json::from_str(r#"{"drinks":[{"strDrink":"Ghost","strCategory":null}]}"#)
                .unwrap();
        let drink = &env.drinks.unwrap()[0];
        assert_eq!(drink.name, "Ghost");
        assert_eq!(drink.category, "");
        assert_eq!(drink.thumbnail_url, "");
        assert_eq!(drink.alcoholic, "");
    }

    #[test]
    fn error_body_summary_includes_details() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error":"Error al conectar con la API externa","details":"timeout"}"#,
        )
        .unwrap();
        assert_eq!(body.summary(), "Error al conectar con la API externa (timeout)");
    }
}
