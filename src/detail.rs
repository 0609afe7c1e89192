//! Detail page composition.
//!
//! One mandatory lookup (the pokemon record) plus two optional enrichments
//! (species and first ability). Enrichment failures are logged and folded
//! into `None`; only a failed core lookup fails the whole load.

use crate::api::{
    AbilityRecord, Error, FlavorTextEntry, LocalizedName, PokeSource, PokemonRecord, SpeciesRecord,
};
use crate::state::{BaseStat, PokemonDetail, SpriteFacing};

pub const NO_DESCRIPTION: &str = "No description available.";

const SPRITE_BASE: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// An entry in a language-tagged sequence.
pub trait Localized {
    fn language(&self) -> &str;
}

impl Localized for LocalizedName {
    fn language(&self) -> &str {
        &self.language.name
    }
}

impl Localized for FlavorTextEntry {
    fn language(&self) -> &str {
        &self.language.name
    }
}

/// First entry tagged with `language`, in sequence order.
pub fn localized<'a, T: Localized>(entries: &'a [T], language: &str) -> Option<&'a T> {
    entries.iter().find(|entry| entry.language() == language)
}

pub async fn load_detail(
    source: &dyn PokeSource,
    id: u32,
    language: &str,
) -> Result<PokemonDetail, Error> {
    let core = source.pokemon(id).await?;
    let ability_url = core
        .abilities
        .first()
        .map(|slot| slot.ability.url.clone())
        .filter(|url| !url.is_empty());

    let species = async { enrichment("species", id, source.species(id).await) };
    let ability = async {
        match ability_url {
            Some(url) => enrichment("ability", id, source.ability(&url).await),
            None => None,
        }
    };
    let (species, ability) = tokio::join!(species, ability);

    Ok(compose(core, species.as_ref(), ability.as_ref(), language))
}

fn enrichment<T>(what: &str, id: u32, result: Result<T, Error>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{what} lookup for #{id} failed: {err}");
            None
        }
    }
}

pub fn compose(
    core: PokemonRecord,
    species: Option<&SpeciesRecord>,
    ability: Option<&AbilityRecord>,
    language: &str,
) -> PokemonDetail {
    let display_name = species
        .and_then(|species| localized(&species.names, language))
        .map(|entry| entry.name.clone())
        .unwrap_or_else(|| core.name.clone());
    let description = species
        .and_then(|species| localized(&species.flavor_text_entries, language))
        .map(|entry| sanitize_text(&entry.flavor_text));

    let base_ability = core
        .abilities
        .first()
        .map(|slot| slot.ability.name.clone())
        .unwrap_or_else(|| "unknown".to_string());
    let ability_name = ability
        .and_then(|ability| localized(&ability.names, language))
        .map(|entry| entry.name.clone())
        .unwrap_or(base_ability);

    PokemonDetail {
        id: core.id,
        display_name,
        height_dm: core.height,
        weight_hg: core.weight,
        types: core
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        ability_name,
        description,
        stats: core
            .stats
            .into_iter()
            .map(|slot| BaseStat {
                name: slot.stat.name,
                value: slot.base_stat,
            })
            .collect(),
    }
}

fn sanitize_text(text: &str) -> String {
    text.replace(['\n', '\u{000C}'], " ")
}

impl PokemonDetail {
    pub fn dex_number(&self) -> String {
        format!("{:03}", self.id)
    }

    pub fn height_label(&self) -> String {
        format!("{} M", format_tenths(self.height_dm))
    }

    pub fn weight_label(&self) -> String {
        format!("{} KG", format_tenths(self.weight_hg))
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }

    pub fn type_icons(&self) -> impl Iterator<Item = (&str, TypeIcon)> {
        self.types
            .iter()
            .map(|name| (name.as_str(), TypeIcon::for_type(name)))
    }
}

/// Tenths of a unit as a decimal without a trailing `.0`.
pub fn format_tenths(value: u32) -> String {
    let whole = value / 10;
    let fraction = value % 10;
    if fraction == 0 {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

impl SpriteFacing {
    pub fn sprite_url(self, id: u32) -> String {
        match self {
            SpriteFacing::Front => format!("{SPRITE_BASE}/other/showdown/{id}.gif"),
            SpriteFacing::Back => format!("{SPRITE_BASE}/other/showdown/back/{id}.gif"),
        }
    }
}

pub fn artwork_url(id: u32) -> String {
    format!("{SPRITE_BASE}/other/official-artwork/{id}.png")
}

/// Type badge icons. Unlisted type names fall back to `Default`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeIcon {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Default,
}

impl TypeIcon {
    pub fn for_type(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "normal" => TypeIcon::Normal,
            "fire" => TypeIcon::Fire,
            "water" => TypeIcon::Water,
            "grass" => TypeIcon::Grass,
            "electric" => TypeIcon::Electric,
            "ice" => TypeIcon::Ice,
            "fighting" => TypeIcon::Fighting,
            "poison" => TypeIcon::Poison,
            "ground" => TypeIcon::Ground,
            "flying" => TypeIcon::Flying,
            "psychic" => TypeIcon::Psychic,
            "bug" => TypeIcon::Bug,
            "rock" => TypeIcon::Rock,
            "ghost" => TypeIcon::Ghost,
            "dragon" => TypeIcon::Dragon,
            "dark" => TypeIcon::Dark,
            "steel" => TypeIcon::Steel,
            _ => TypeIcon::Default,
        }
    }

    pub fn asset_path(self) -> &'static str {
        match self {
            TypeIcon::Normal => "/assets/NormalIC_Masters.png",
            TypeIcon::Fire => "/assets/FireIC_Masters.png",
            TypeIcon::Water => "/assets/WaterIC_Masters.png",
            TypeIcon::Grass => "/assets/GrassIC_Masters.png",
            TypeIcon::Electric => "/assets/ElectricIC_Masters.png",
            TypeIcon::Ice => "/assets/IceIC_Masters.png",
            TypeIcon::Fighting => "/assets/FightingIC_Masters.png",
            TypeIcon::Poison => "/assets/PoisonIC_Masters.png",
            TypeIcon::Ground => "/assets/GroundIC_Masters.png",
            TypeIcon::Flying => "/assets/FlyingIC_Masters.png",
            TypeIcon::Psychic => "/assets/PsychicIC_Masters.png",
            TypeIcon::Bug => "/assets/BugIC_Masters.png",
            TypeIcon::Rock => "/assets/RockIC_Masters.png",
            TypeIcon::Ghost => "/assets/GhostIC_Masters.png",
            TypeIcon::Dragon => "/assets/DragonIC_Masters.png",
            TypeIcon::Dark => "/assets/DarkIC_Masters.png",
            TypeIcon::Steel => "/assets/SteelIC_Masters.png",
            TypeIcon::Default => "/assets/defaultIC_Masters.png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pikachu() -> PokemonRecord {
        serde_json::from_value(serde_json::json!({
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "types": [{"type": {"name": "electric"}}],
            "abilities": [{"ability": {"name": "static", "url": "https://pokeapi.co/api/v2/ability/9/"}}],
            "stats": [{"base_stat": 35, "stat": {"name": "hp"}}]
        }))
        .unwrap()
    }

    fn species() -> SpeciesRecord {
        serde_json::from_value(serde_json::json!({
            "names": [
                {"name": "ピカチュウ", "language": {"name": "ja"}},
                {"name": "Pikachu", "language": {"name": "es"}}
            ],
            "flavor_text_entries": [
                {"flavor_text": "When several of\nthese POKéMON\u{000C}gather.", "language": {"name": "en"}},
                {"flavor_text": "Cuanto más potente\nes la energía.", "language": {"name": "es"}},
                {"flavor_text": "Segunda entrada.", "language": {"name": "es"}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_compose_without_enrichment_falls_back() {
        let detail = compose(pikachu(), None, None, "es");
        assert_eq!(detail.display_name, "pikachu");
        assert_eq!(detail.ability_name, "static");
        assert_eq!(detail.description, None);
        assert_eq!(detail.description_text(), NO_DESCRIPTION);
        assert_eq!(detail.types, vec!["electric".to_string()]);
        assert_eq!(
            detail.stats,
            vec![BaseStat {
                name: "hp".to_string(),
                value: 35
            }]
        );
    }

    #[test]
    fn test_compose_picks_first_localized_entry() {
        let ability: AbilityRecord = serde_json::from_value(serde_json::json!({
            "names": [{"name": "Electricidad Estática", "language": {"name": "es"}}]
        }))
        .unwrap();
        let detail = compose(pikachu(), Some(&species()), Some(&ability), "es");
        assert_eq!(detail.display_name, "Pikachu");
        assert_eq!(detail.ability_name, "Electricidad Estática");
        assert_eq!(detail.description_text(), "Cuanto más potente es la energía.");
    }

    #[test]
    fn test_missing_language_defaults_each_field_independently() {
        let detail = compose(pikachu(), Some(&species()), None, "en");
        assert_eq!(detail.display_name, "pikachu");
        assert_eq!(
            detail.description_text(),
            "When several of these POKéMON gather."
        );
    }

    #[test]
    fn test_display_conversions() {
        let detail = compose(pikachu(), None, None, "en");
        assert_eq!(detail.dex_number(), "025");
        assert_eq!(detail.height_label(), "0.4 M");
        assert_eq!(detail.weight_label(), "6 KG");
        assert_eq!(format_tenths(0), "0");
        assert_eq!(format_tenths(17), "1.7");
        assert_eq!(format_tenths(9999), "999.9");
    }

    #[test]
    fn test_type_icon_lookup() {
        assert_eq!(TypeIcon::for_type("electric"), TypeIcon::Electric);
        assert_eq!(TypeIcon::for_type("FIRE"), TypeIcon::Fire);
        assert_eq!(TypeIcon::for_type("fairy"), TypeIcon::Default);
        assert_eq!(
            TypeIcon::Electric.asset_path(),
            "/assets/ElectricIC_Masters.png"
        );
        assert_eq!(TypeIcon::Default.asset_path(), "/assets/defaultIC_Masters.png");
    }

    #[test]
    fn test_sprite_facing_urls() {
        assert_eq!(
            SpriteFacing::Front.sprite_url(25),
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/showdown/25.gif"
        );
        assert_eq!(
            SpriteFacing::Back.sprite_url(25),
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/showdown/back/25.gif"
        );
        assert_eq!(SpriteFacing::Front.toggle(), SpriteFacing::Back);
        assert_eq!(SpriteFacing::Back.toggle(), SpriteFacing::Front);
    }
}
