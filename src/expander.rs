use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    // Short watch keywords that search better as several concrete phrases.
    static ref EXPANSIONS: HashMap<&'static str, Vec<&'static str>> = {
        let mut m = HashMap::new();
        m.insert("pokemon", vec!["pokemon cards", "pokemon booster box"]);
        m.insert("one piece", vec!["one piece card game booster box", "one piece tcg starter deck"]);
        m.insert("mtg", vec!["magic the gathering booster box", "magic the gathering collector booster"]);
        m.insert("switch", vec!["nintendo switch oled", "nintendo switch 2", "nintendo switch lite"]);
        m.insert("ps5", vec!["playstation 5 console", "ps5 slim", "ps5 digital edition"]);
        m.insert("xbox", vec!["xbox series x", "xbox series s"]);
        m.insert("airpods", vec!["apple airpods pro", "apple airpods 4"]);
        m
    };
}

/// Maps a watch keyword to the phrases actually sent to price sources.
#[derive(Debug, Clone)]
pub struct QueryExpander {
    table: HashMap<String, Vec<String>>,
}

impl Default for QueryExpander {
    fn default() -> Self {
        Self::from_pairs(EXPANSIONS.iter().map(|(k, v)| (*k, v.clone())))
    }
}

impl QueryExpander {
    pub fn from_pairs<K, P, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<P>)>,
        K: AsRef<str>,
        P: Into<String>,
    {
        let table = pairs
            .into_iter()
            .map(|(k, phrases)| (lookup_key(k.as_ref()), phrases.into_iter().map(Into::into).collect::<Vec<String>>()))
            .filter(|(_, phrases)| !phrases.is_empty())
            .collect();
        Self { table }
    }

    /// Table phrases in order, or the keyword itself when no entry exists. Never empty.
    pub fn expand(&self, keyword: &str) -> Vec<String> {
        match self.table.get(&lookup_key(keyword)) {
            Some(phrases) => phrases.clone(),
            None => vec![keyword.to_string()],
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn lookup_key(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}
