use crate::schema::tile::identity::MAX_ZOOM;

use configparser::ini::Ini;

use std::collections::hash_map::HashMap;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::result::Result;
use std::string::String;


/// Per-layer decode gates. An empty layer table means every layer in
/// the buffer is decoded; a non-empty table decodes only the layers it
/// names, each within its configured zoom range.
#[derive(Debug)]
pub struct DecodeConfig {
    pub layers: HashMap<String, LayerConfig>,
}

impl DecodeConfig {
    pub fn new() -> DecodeConfig {
        DecodeConfig {
            layers: HashMap::new(),
        }
    }

    pub fn is_layer_wanted(&self, name: &str, zoom: u32) -> bool {
        if self.layers.is_empty() {
            return true;
        }
        match self.layers.get(name) {
            Some(layer) => layer.min_zoom <= (zoom as u64) && (zoom as u64) <= layer.max_zoom,
            None => false,
        }
    }
}

#[derive(Debug)]
pub struct LayerConfig {
    pub name: String,
    pub min_zoom: u64,
    pub max_zoom: u64,
}

impl LayerConfig {
    pub fn new() -> LayerConfig {
        LayerConfig {
            name: String::from("default"),
            min_zoom: 0,
            max_zoom: MAX_ZOOM as u64,
        }
    }
}

pub fn load(path: &Path) -> Result<DecodeConfig, ParseError> {
    let mut ini = Ini::new();
    ini.load(path)?;
    return parse(&ini);
}

fn parse(ini: &Ini) -> Result<DecodeConfig, ParseError> {
    let mut config = DecodeConfig::new();
    for section_name in &(ini.sections()) {
        let layer = parse_layer(ini, section_name)?;
        config.layers.insert(section_name.clone(), layer);
    }
    return Ok(config);
}

fn parse_layer(ini: &Ini, section_name: &String) -> Result<LayerConfig, ParseError> {
    let mut config = LayerConfig::new();
    config.name = section_name.to_string();
    if let Some(min_zoom) = ini.getuint(section_name.as_str(), "minzoom")? {
        config.min_zoom = min_zoom;
    }
    if let Some(max_zoom) = ini.getuint(section_name.as_str(), "maxzoom")? {
        config.max_zoom = max_zoom;
    }
    return Ok(config);
}

#[derive(Debug)]
pub struct ParseError {
    reason: String,
}

impl From<String> for ParseError {
    fn from(reason: String) -> Self {
        return ParseError { reason };
    }
}

impl Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecodeConfig parsing failed: {}", self.reason)
    }
}
