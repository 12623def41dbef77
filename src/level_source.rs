use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{de, Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::core::{Level, Position};
use crate::error::{LevelError, PackError};

const BUILTIN_PACK: &str = include_str!("../levels/default_pack.json");

/// Supplies levels by index. Implementations are read-only once built, so a
/// level can be shared by any number of sessions.
pub trait LevelSource {
    fn level(&self, index: usize) -> Result<Arc<Level>, LevelError>;

    fn level_count(&self) -> usize;
}

/// One level as published in a level pack. Packs exported from the object
/// store carry integers as strings, so every field accepts either form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LevelRecord {
    #[serde(deserialize_with = "lenient_number")]
    pub width: usize,
    #[serde(deserialize_with = "lenient_numbers")]
    pub map_data: Vec<u8>,
    #[serde(deserialize_with = "lenient_numbers")]
    pub box_pos: Vec<usize>,
    #[serde(deserialize_with = "lenient_numbers")]
    pub target_pos: Vec<usize>,
    #[serde(deserialize_with = "lenient_number")]
    pub start_pos: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

impl<T> NumberOrText<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn into_number<E: de::Error>(self) -> Result<T, E> {
        match self {
            NumberOrText::Number(n) => Ok(n),
            NumberOrText::Text(text) => text
                .trim()
                .parse()
                .map_err(|err| E::custom(format!("invalid number {:?}: {}", text, err))),
        }
    }
}

fn lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    NumberOrText::<T>::deserialize(deserializer)?.into_number()
}

fn lenient_numbers<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    Vec::<NumberOrText<T>>::deserialize(deserializer)?
        .into_iter()
        .map(NumberOrText::into_number)
        .collect()
}

#[derive(Serialize, Deserialize, Debug)]
struct PackRecord {
    levels: Vec<LevelRecord>,
}

impl LevelRecord {
    pub fn to_level(&self) -> Result<Level, LevelError> {
        Level::from_flags(
            self.width,
            &self.map_data,
            self.box_pos.iter().map(|&p| Position(p)),
            self.target_pos.iter().map(|&p| Position(p)),
            Position(self.start_pos),
        )
    }
}

/// An ordered, validated collection of levels.
#[derive(Debug, Clone)]
pub struct LevelPack {
    levels: Vec<Arc<Level>>,
}

impl LevelPack {
    pub fn new(levels: Vec<Level>) -> Result<LevelPack, PackError> {
        if levels.is_empty() {
            return Err(PackError::Empty);
        }
        Ok(LevelPack {
            levels: levels.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parses and validates every level up front; a single malformed level
    /// rejects the whole pack.
    pub fn from_json(json: &str) -> Result<LevelPack, PackError> {
        let pack: PackRecord = serde_json::from_str(json)?;
        let levels = pack
            .levels
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .to_level()
                    .map_err(|source| PackError::InvalidLevel { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        LevelPack::new(levels)
    }

    pub fn from_path(path: &Path) -> Result<LevelPack, PackError> {
        let json = std::fs::read_to_string(path).map_err(|source| PackError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let pack = LevelPack::from_json(&json)?;
        info!(path = %path.display(), levels = pack.level_count(), "loaded level pack");
        Ok(pack)
    }

    pub fn builtin() -> Result<LevelPack, PackError> {
        LevelPack::from_json(BUILTIN_PACK)
    }
}

impl LevelSource for LevelPack {
    fn level(&self, index: usize) -> Result<Arc<Level>, LevelError> {
        self.levels
            .get(index)
            .cloned()
            .ok_or(LevelError::UnknownLevel { index, count: self.levels.len() })
    }

    fn level_count(&self) -> usize {
        self.levels.len()
    }
}
