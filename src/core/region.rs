//! Region naming from externally supplied area grids.
//!
//! The two grid files (tower grid, field-area grid) are decoded by the
//! caller; this module only consumes them through the [`AreaLookup`]
//! capability and maps the tower grid's index onto the fixed region names.

/// Opaque "2D coordinate to area index" capability backed by a loaded grid.
///
/// Implementations must be pure: the same coordinates always yield the
/// same index for a given loaded grid.
pub trait AreaLookup {
    fn area_at(&self, x: f32, z: f32) -> i32;
}

/// Region names addressed by tower grid index, in grid order.
pub const TOWER_NAMES: [&str; 15] = [
    "Hebra",
    "Tabantha",
    "Gerudo",
    "Wasteland",
    "Woodland",
    "Central",
    "Great Plateau",
    "Dueling Peaks",
    "Lake",
    "Eldin",
    "Akkala",
    "Lanayru",
    "Hateno",
    "Faron",
    "Ridgeland",
];

/// Composition of the two independent grid lookups.
pub struct RegionResolver<'a> {
    tower: &'a dyn AreaLookup,
    field: &'a dyn AreaLookup,
}

impl<'a> RegionResolver<'a> {
    pub fn new(tower: &'a dyn AreaLookup, field: &'a dyn AreaLookup) -> Self {
        Self { tower, field }
    }

    /// Tower region name for a coordinate; empty for an index outside the
    /// known tower list.
    pub fn tower_region_name(&self, x: f32, z: f32) -> &'static str {
        let idx = self.tower.area_at(x, z);
        usize::try_from(idx)
            .ok()
            .and_then(|i| TOWER_NAMES.get(i))
            .copied()
            .unwrap_or("")
    }

    /// Raw field-area index for a coordinate. Only meaningful for
    /// MainField-type maps; the caller applies that rule.
    pub fn field_area(&self, x: f32, z: f32) -> i32 {
        self.field.area_at(x, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedArea(i32);

    impl AreaLookup for FixedArea {
        fn area_at(&self, _x: f32, _z: f32) -> i32 {
            self.0
        }
    }

    #[test]
    fn test_tower_region_name() {
        let tower = FixedArea(5);
        let field = FixedArea(0);
        let resolver = RegionResolver::new(&tower, &field);
        assert_eq!(resolver.tower_region_name(0.0, 0.0), "Central");
    }

    #[test]
    fn test_tower_index_out_of_range_is_empty() {
        let tower = FixedArea(99);
        let field = FixedArea(0);
        let resolver = RegionResolver::new(&tower, &field);
        assert_eq!(resolver.tower_region_name(0.0, 0.0), "");

        let tower = FixedArea(-1);
        let resolver = RegionResolver::new(&tower, &field);
        assert_eq!(resolver.tower_region_name(0.0, 0.0), "");
    }

    #[test]
    fn test_field_area_passthrough() {
        let tower = FixedArea(0);
        let field = FixedArea(64);
        let resolver = RegionResolver::new(&tower, &field);
        assert_eq!(resolver.field_area(123.0, -456.0), 64);
    }
}
