use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Error;

/// Deserialize JSON with key-path context in error messages.
pub fn json_from_str<T: DeserializeOwned>(src: &str, origin: &Path) -> Result<T, Error> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| parse_error(err, origin))
}

/// Same, for a JSON value already in memory (e.g. a subtree picked by pointer).
pub fn from_value_with_path<T: DeserializeOwned>(value: serde_json::Value, origin: &Path) -> Result<T, Error> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| parse_error(err, origin))
}

pub fn yaml_from_str<T: DeserializeOwned>(src: &str, origin: &Path) -> Result<T, Error> {
    let de = serde_yaml::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| parse_error(err, origin))
}

fn parse_error<E: std::fmt::Display>(err: serde_path_to_error::Error<E>, origin: &Path) -> Error {
    Error::Parse {
        path: origin.to_path_buf(),
        location: err.path().to_string(),
        message: err.into_inner().to_string(),
    }
}
