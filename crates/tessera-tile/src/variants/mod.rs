//! The built-in tile variants and their registration table.

mod chest;
mod furnace;
mod sign;

pub use chest::Chest;
pub use furnace::Furnace;
pub use sign::Sign;

use crate::registry::TileRegistry;

/// Register every built-in variant under its canonical name and the
/// namespaced alias older and cross-flavor saves use.
pub fn register_builtin(registry: &mut TileRegistry) {
    registry.register::<Chest>(&["Chest", "minecraft:chest"]);
    registry.register::<Furnace>(&["Furnace", "minecraft:furnace"]);
    registry.register::<Sign>(&["Sign", "minecraft:sign"]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_aliases_all_resolve() {
        let mut registry = TileRegistry::new();
        register_builtin(&mut registry);
        for alias in [
            "Chest",
            "minecraft:chest",
            "Furnace",
            "minecraft:furnace",
            "Sign",
            "minecraft:sign",
        ] {
            assert!(registry.resolve(alias).is_some(), "{alias} did not resolve");
        }
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.save_id::<Chest>(), "Chest");
    }
}
