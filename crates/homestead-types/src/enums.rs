//! Enumeration types for the Homestead simulation.
//!
//! Every keyed table in the engine (stockpile, worker roles, buildings,
//! unlock flags, recipes) is keyed by one of these closed enumerations, so
//! a misspelled key is a compile error instead of a silent no-op.
//!
//! Each enumeration also carries the stable string form used in snapshots.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A resource tracked in the settlement stockpile.
///
/// `Food` is a display-only aggregate recomputed from `Meat + Grain`; it is
/// never consumed directly. `QuarrySites` and `MineSites` count discovered
/// building sites and are hidden from the resource display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Display-only total of meat and grain.
    Food,
    /// Meat brought in by hunters. Eaten first.
    Meat,
    /// Grain from the summer harvest. Eaten after meat.
    Grain,
    /// Animal pelts, burned through as the warmth proxy.
    Pelts,
    /// Raw wood felled by woodsmen.
    Wood,
    /// Planks milled from wood.
    Planks,
    /// Guts, separated out once hunters have brought in enough meat.
    Guts,
    /// Bows crafted by bowyers.
    Bows,
    /// Feathers, only gathered by bow-equipped hunters.
    Feathers,
    /// Skins, only gathered by bow-equipped hunters.
    Skins,
    /// Arrows crafted by bowyers.
    Arrows,
    /// Flax fibre from the summer harvest.
    Flax,
    /// Linen woven from flax.
    Linen,
    /// Plain clothing sewn by tailors.
    Clothing,
    /// Cloaks sewn from linen and pelts.
    Cloaks,
    /// Padded gambesons sewn from linen and pelts.
    Gambesons,
    /// Discovered but unbuilt quarry sites.
    QuarrySites,
    /// Discovered but unbuilt mine sites.
    MineSites,
    /// Stone cut at quarries.
    Stone,
    /// Ore dug at mines.
    Ore,
    /// Ingots poured by smelters.
    Ingots,
    /// Tools forged at smithies.
    Tools,
    /// Daggers forged at smithies.
    Daggers,
    /// Swords forged at smithies.
    Swords,
}

impl Resource {
    /// Every resource, in declaration (and stockpile) order.
    pub const ALL: [Self; 24] = [
        Self::Food,
        Self::Meat,
        Self::Grain,
        Self::Pelts,
        Self::Wood,
        Self::Planks,
        Self::Guts,
        Self::Bows,
        Self::Feathers,
        Self::Skins,
        Self::Arrows,
        Self::Flax,
        Self::Linen,
        Self::Clothing,
        Self::Cloaks,
        Self::Gambesons,
        Self::QuarrySites,
        Self::MineSites,
        Self::Stone,
        Self::Ore,
        Self::Ingots,
        Self::Tools,
        Self::Daggers,
        Self::Swords,
    ];

    /// The stable name used in snapshots and the display list.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Meat => "Meat",
            Self::Grain => "Grain",
            Self::Pelts => "Pelts",
            Self::Guts => "Guts",
            Self::Feathers => "Feathers",
            Self::Skins => "Skins",
            Self::Wood => "Wood",
            Self::Planks => "Planks",
            Self::Flax => "Flax",
            Self::Linen => "Linen",
            Self::Bows => "Bows",
            Self::Arrows => "Arrows",
            Self::Clothing => "Clothing",
            Self::Cloaks => "Cloaks",
            Self::Gambesons => "Gambesons",
            Self::QuarrySites => "QuarrySites",
            Self::MineSites => "MineSites",
            Self::Stone => "Stone",
            Self::Ore => "Ore",
            Self::Ingots => "Ingots",
            Self::Tools => "Tools",
            Self::Daggers => "Daggers",
            Self::Swords => "Swords",
        }
    }

    /// Parse a snapshot name. Accepts the legacy `PaddedArmor` name for
    /// [`Resource::Gambesons`].
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "PaddedArmor" {
            return Some(Self::Gambesons);
        }
        Self::ALL.into_iter().find(|r| r.name() == name)
    }

    /// Whether this resource is a discovered-site counter rather than a good.
    pub const fn is_site(self) -> bool {
        matches!(self, Self::QuarrySites | Self::MineSites)
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Worker roles
// ---------------------------------------------------------------------------

/// A worker role with its own headcount.
///
/// Building staff (farmers, millers, tailors, ...) are not roles: they are
/// counted through their building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Idle generalist; every other role is drawn from this pool.
    Peasant,
    /// Hunts meat, pelts, guts, feathers and skins.
    Hunter,
    /// Fells wood.
    Woodsman,
    /// Crafts bows and arrows.
    Bowyer,
    /// Weaves flax into linen.
    Weaver,
    /// Explores, drawing from the site deck.
    Ranger,
}

impl Role {
    /// Every role, in population order.
    pub const ALL: [Self; 6] = [
        Self::Peasant,
        Self::Hunter,
        Self::Woodsman,
        Self::Bowyer,
        Self::Weaver,
        Self::Ranger,
    ];

    /// Snapshot key holding this role's headcount.
    pub const fn snapshot_key(self) -> &'static str {
        match self {
            Self::Peasant => "peasants",
            Self::Hunter => "hunters",
            Self::Woodsman => "woodsmen",
            Self::Bowyer => "bowyers",
            Self::Weaver => "weavers",
            Self::Ranger => "rangers",
        }
    }
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// A building type counted by the settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Building {
    /// Raises the population cap by two.
    House,
    /// Staffed; mills wood into planks.
    LumberMill,
    /// Staffed; grows grain and flax over the seasons.
    Farm,
    /// Staffed; cuts stone. Requires a quarry site.
    Quarry,
    /// Staffed; digs ore. Requires a mine site.
    Mine,
    /// Staffed; smelts ore into ingots.
    Smelter,
    /// Staffed; forges tools and weapons through a job slot.
    Smithy,
    /// Staffed; sews garments through a job slot.
    TailorShop,
    /// Adds overflow storage slots.
    Cellar,
    /// Adds a large block of overflow storage slots. Requires a cellar.
    Warehouse,
}

impl Building {
    /// Every building type.
    pub const ALL: [Self; 10] = [
        Self::House,
        Self::LumberMill,
        Self::Farm,
        Self::Quarry,
        Self::Mine,
        Self::Smelter,
        Self::Smithy,
        Self::TailorShop,
        Self::Cellar,
        Self::Warehouse,
    ];

    /// Whether each unit of this building permanently employs one worker.
    pub const fn is_staffed(self) -> bool {
        matches!(
            self,
            Self::LumberMill
                | Self::Farm
                | Self::Quarry
                | Self::Mine
                | Self::Smelter
                | Self::Smithy
                | Self::TailorShop
        )
    }

    /// Snapshot key holding this building's count.
    pub const fn snapshot_key(self) -> &'static str {
        match self {
            Self::House => "houses",
            Self::LumberMill => "lumber_mills",
            Self::Farm => "farms",
            Self::Quarry => "quarries",
            Self::Mine => "mines",
            Self::Smelter => "smelters",
            Self::Smithy => "smithies",
            Self::TailorShop => "tailor_shops",
            Self::Cellar => "cellars",
            Self::Warehouse => "warehouses",
        }
    }
}

// ---------------------------------------------------------------------------
// Seasons
// ---------------------------------------------------------------------------

/// One phase of the four-phase annual cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    /// Phase 0. Farms grow.
    Spring,
    /// Phase 1. The grain buffer is harvested on entry.
    Summer,
    /// Phase 2. Growth slots are locked in on entry. Farms grow.
    Autumn,
    /// Phase 3. Farms grow.
    Winter,
}

impl Season {
    /// Map a phase index to a season; wraps modulo 4.
    pub const fn from_phase(phase: u64) -> Self {
        match phase.checked_rem(4) {
            Some(1) => Self::Summer,
            Some(2) => Self::Autumn,
            Some(3) => Self::Winter,
            _ => Self::Spring,
        }
    }

    /// The phase index (0 = spring).
    pub const fn phase(self) -> u64 {
        match self {
            Self::Spring => 0,
            Self::Summer => 1,
            Self::Autumn => 2,
            Self::Winter => 3,
        }
    }

    /// The icon shown for this season.
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Spring => "🌱",
            Self::Summer => "☀️",
            Self::Autumn => "🍂",
            Self::Winter => "❄️",
        }
    }

    /// Whether farms add to the grain buffer during this season.
    pub const fn is_growing(self) -> bool {
        !matches!(self, Self::Summer)
    }
}

// ---------------------------------------------------------------------------
// Exploration
// ---------------------------------------------------------------------------

/// A card in the rangers' exploration deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteCard {
    /// Filler card; replaces every other card once drawn.
    Nothing,
    /// A dense forest.
    Forest,
    /// A quiet clearing.
    Clearing,
    /// A fresh spring.
    Spring,
    /// A stone outcrop: grants a quarry site.
    Quarry,
    /// An ore vein: grants a mine site.
    Mine,
    /// A wolf den.
    WolfDen,
    /// A ley line and crystal outcrop.
    ManaSite,
    /// A kobold village.
    KoboldVillage,
    /// A sacred grove.
    Grove,
    /// Old ruins.
    Ruin,
}

impl SiteCard {
    /// Every card kind.
    pub const ALL: [Self; 11] = [
        Self::Nothing,
        Self::Forest,
        Self::Clearing,
        Self::Spring,
        Self::Quarry,
        Self::Mine,
        Self::WolfDen,
        Self::ManaSite,
        Self::KoboldVillage,
        Self::Grove,
        Self::Ruin,
    ];

    /// The snapshot label of this card.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nothing => "nothing",
            Self::Forest => "forest",
            Self::Clearing => "clearing",
            Self::Spring => "spring",
            Self::Quarry => "quarry",
            Self::Mine => "mine",
            Self::WolfDen => "wolf_den",
            Self::ManaSite => "mana_site",
            Self::KoboldVillage => "kobold_village",
            Self::Grove => "grove",
            Self::Ruin => "ruin",
        }
    }

    /// Parse a snapshot label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

// ---------------------------------------------------------------------------
// Unlocks
// ---------------------------------------------------------------------------

/// A one-way progression flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnlockFlag {
    /// Worker roles are available (population above zero).
    Jobs,
    /// Farms can be organised.
    Farm,
    /// Meat and grain are shown separately instead of as food.
    FoodBreakdown,
    /// Hunters separate out guts.
    Guts,
    /// Guts have appeared in the stockpile.
    GutsVisible,
    /// Farms yield flax at harvest.
    Flax,
    /// Weavers can be assigned.
    Weaver,
    /// Bowyers can be assigned.
    Bowyer,
    /// Rangers can be trained.
    Ranger,
    /// Quarries can be built.
    Quarry,
    /// Mines can be dug.
    Mine,
    /// Smelters can be built.
    Smelter,
    /// Smithies can be built.
    Smithy,
    /// Tailor shops can be opened.
    Tailor,
}

impl UnlockFlag {
    /// Every flag, in evaluation order.
    pub const ALL: [Self; 14] = [
        Self::Jobs,
        Self::Farm,
        Self::FoodBreakdown,
        Self::Guts,
        Self::GutsVisible,
        Self::Flax,
        Self::Weaver,
        Self::Bowyer,
        Self::Ranger,
        Self::Quarry,
        Self::Mine,
        Self::Smelter,
        Self::Smithy,
        Self::Tailor,
    ];

    /// Snapshot key holding this flag.
    pub const fn snapshot_key(self) -> &'static str {
        match self {
            Self::Jobs => "jobs_unlocked",
            Self::Farm => "farm_unlocked",
            Self::FoodBreakdown => "food_breakdown_unlocked",
            Self::Guts => "guts_unlocked",
            Self::GutsVisible => "guts_visible",
            Self::Flax => "flax_unlocked",
            Self::Weaver => "weaver_unlocked",
            Self::Bowyer => "bowyer_unlocked",
            Self::Ranger => "ranger_unlocked",
            Self::Quarry => "quarry_unlocked",
            Self::Mine => "mine_unlocked",
            Self::Smelter => "smelter_unlocked",
            Self::Smithy => "smithy_unlocked",
            Self::Tailor => "tailor_unlocked",
        }
    }
}

// ---------------------------------------------------------------------------
// Crafting
// ---------------------------------------------------------------------------

/// Identifier of an entry in the static recipe table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeId {
    /// Flax into linen.
    WeaveLinen,
    /// Feathers and wood into a bundle of arrows.
    CraftArrows,
    /// Wood and guts into a bow.
    CraftBow,
    /// Ingots into a sword.
    SmithSword,
    /// Ingot and wood into a tool.
    SmithTool,
    /// Ingot into a dagger.
    SmithDagger,
    /// Linen into clothing.
    TailorClothing,
    /// Linen and a pelt into a cloak.
    TailorCloak,
    /// Linen and a pelt into a gambeson.
    TailorGambeson,
}

impl RecipeId {
    /// Every recipe.
    pub const ALL: [Self; 9] = [
        Self::WeaveLinen,
        Self::CraftArrows,
        Self::CraftBow,
        Self::SmithSword,
        Self::SmithTool,
        Self::SmithDagger,
        Self::TailorClothing,
        Self::TailorCloak,
        Self::TailorGambeson,
    ];

    /// The snapshot identifier of this recipe.
    pub const fn name(self) -> &'static str {
        match self {
            Self::WeaveLinen => "weave_linen",
            Self::CraftArrows => "craft_arrows",
            Self::CraftBow => "craft_bow",
            Self::SmithSword => "smith_sword",
            Self::SmithTool => "smith_tool",
            Self::SmithDagger => "smith_dagger",
            Self::TailorClothing => "tailor_clothing",
            Self::TailorCloak => "tailor_cloak",
            Self::TailorGambeson => "tailor_gambeson",
        }
    }

    /// Parse a snapshot identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

/// A role whose work runs through job processors rather than direct yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CraftRole {
    /// One slot per weaver.
    Weaver,
    /// One slot per bowyer.
    Bowyer,
    /// One slot per smithy building.
    Smithy,
    /// One slot per tailor shop.
    Tailor,
}

impl CraftRole {
    /// Every crafting role.
    pub const ALL: [Self; 4] = [Self::Weaver, Self::Bowyer, Self::Smithy, Self::Tailor];

    /// Snapshot key holding this role's job list.
    pub const fn snapshot_key(self) -> &'static str {
        match self {
            Self::Weaver => "weaver_jobs",
            Self::Bowyer => "bowyer_jobs",
            Self::Smithy => "smithy_jobs",
            Self::Tailor => "tailor_jobs",
        }
    }
}

/// Where a reserved job output will be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// The resource's own stockpile slot, bounded by its cap.
    Normal,
    /// The shared overflow cellar.
    Cellar,
}

impl Destination {
    /// The snapshot label of this destination.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Cellar => "cellar",
        }
    }

    /// Parse a snapshot label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "normal" => Some(Self::Normal),
            "cellar" => Some(Self::Cellar),
            _ => None,
        }
    }
}
