//! The static recipe table.
//!
//! | Recipe | Inputs | Output | Work time |
//! |---|---|---|---|
//! | `weave_linen` | Flax 1 | Linen 1 | 10 |
//! | `craft_arrows` | Feathers 20, Wood 2 | Arrows 20 | 6 |
//! | `craft_bow` | Wood 3, Guts 1 | Bows 1 | 6 |
//! | `smith_sword` | Ingots 3 | Swords 1 | 1 |
//! | `smith_tool` | Ingots 1, Wood 1 | Tools 1 | 1 |
//! | `smith_dagger` | Ingots 1 | Daggers 1 | 1 |
//! | `tailor_clothing` | Linen 1 | Clothing 1 | 11 |
//! | `tailor_cloak` | Linen 1, Pelts 1 | Cloaks 1 | 11 |
//! | `tailor_gambeson` | Linen 2, Pelts 1 | Gambesons 1 | 11 |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use homestead_types::{RecipeId, Resource};

/// A crafting recipe: inputs consumed at start, one output delivered on
/// completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    /// Identifier of this recipe.
    pub id: RecipeId,
    /// Inputs debited when the job starts.
    pub inputs: &'static [(Resource, Decimal)],
    /// The crafted resource.
    pub output: Resource,
    /// Quantity of `output` delivered.
    pub output_qty: Decimal,
    /// Work units needed before the output is delivered.
    pub work_time: Decimal,
}

const WEAVER_WORK: Decimal = dec!(10);
const BOWYER_WORK: Decimal = dec!(6);
const SMITHY_WORK: Decimal = dec!(1);
const TAILOR_WORK: Decimal = dec!(11);

const WEAVE_LINEN: Recipe = Recipe {
    id: RecipeId::WeaveLinen,
    inputs: &[(Resource::Flax, dec!(1))],
    output: Resource::Linen,
    output_qty: dec!(1),
    work_time: WEAVER_WORK,
};

const CRAFT_ARROWS: Recipe = Recipe {
    id: RecipeId::CraftArrows,
    inputs: &[(Resource::Feathers, dec!(20)), (Resource::Wood, dec!(2))],
    output: Resource::Arrows,
    output_qty: dec!(20),
    work_time: BOWYER_WORK,
};

const CRAFT_BOW: Recipe = Recipe {
    id: RecipeId::CraftBow,
    inputs: &[(Resource::Wood, dec!(3)), (Resource::Guts, dec!(1))],
    output: Resource::Bows,
    output_qty: dec!(1),
    work_time: BOWYER_WORK,
};

const SMITH_SWORD: Recipe = Recipe {
    id: RecipeId::SmithSword,
    inputs: &[(Resource::Ingots, dec!(3))],
    output: Resource::Swords,
    output_qty: dec!(1),
    work_time: SMITHY_WORK,
};

const SMITH_TOOL: Recipe = Recipe {
    id: RecipeId::SmithTool,
    inputs: &[(Resource::Ingots, dec!(1)), (Resource::Wood, dec!(1))],
    output: Resource::Tools,
    output_qty: dec!(1),
    work_time: SMITHY_WORK,
};

const SMITH_DAGGER: Recipe = Recipe {
    id: RecipeId::SmithDagger,
    inputs: &[(Resource::Ingots, dec!(1))],
    output: Resource::Daggers,
    output_qty: dec!(1),
    work_time: SMITHY_WORK,
};

const TAILOR_CLOTHING: Recipe = Recipe {
    id: RecipeId::TailorClothing,
    inputs: &[(Resource::Linen, dec!(1))],
    output: Resource::Clothing,
    output_qty: dec!(1),
    work_time: TAILOR_WORK,
};

const TAILOR_CLOAK: Recipe = Recipe {
    id: RecipeId::TailorCloak,
    inputs: &[(Resource::Linen, dec!(1)), (Resource::Pelts, dec!(1))],
    output: Resource::Cloaks,
    output_qty: dec!(1),
    work_time: TAILOR_WORK,
};

const TAILOR_GAMBESON: Recipe = Recipe {
    id: RecipeId::TailorGambeson,
    inputs: &[(Resource::Linen, dec!(2)), (Resource::Pelts, dec!(1))],
    output: Resource::Gambesons,
    output_qty: dec!(1),
    work_time: TAILOR_WORK,
};

/// Look up a recipe.
pub const fn recipe(id: RecipeId) -> &'static Recipe {
    match id {
        RecipeId::WeaveLinen => &WEAVE_LINEN,
        RecipeId::CraftArrows => &CRAFT_ARROWS,
        RecipeId::CraftBow => &CRAFT_BOW,
        RecipeId::SmithSword => &SMITH_SWORD,
        RecipeId::SmithTool => &SMITH_TOOL,
        RecipeId::SmithDagger => &SMITH_DAGGER,
        RecipeId::TailorClothing => &TAILOR_CLOTHING,
        RecipeId::TailorCloak => &TAILOR_CLOAK,
        RecipeId::TailorGambeson => &TAILOR_GAMBESON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_recipe_is_keyed_by_its_own_id() {
        for id in RecipeId::ALL {
            assert_eq!(recipe(id).id, id);
        }
    }

    #[test]
    fn arrows_come_in_bundles() {
        let r = recipe(RecipeId::CraftArrows);
        assert_eq!(r.output, Resource::Arrows);
        assert_eq!(r.output_qty, dec!(20));
        assert_eq!(r.work_time, dec!(6));
        assert_eq!(r.inputs.len(), 2);
    }

    #[test]
    fn gambeson_takes_two_linen() {
        let r = recipe(RecipeId::TailorGambeson);
        assert!(r.inputs.contains(&(Resource::Linen, dec!(2))));
        assert!(r.inputs.contains(&(Resource::Pelts, dec!(1))));
        assert_eq!(r.work_time, dec!(11));
    }
}
