use crate::data::asset::AssetClass;

/// Asset silhouette in icon units, centered on the asset anchor
#[derive(Debug, PartialEq)]
pub struct Icon {
    /// SVG path data
    pub path: &'static str,
    /// Outline polygons for painters without an SVG path parser
    pub outline: &'static [&'static [(f64, f64)]],
    /// Bounding radius, used for hit-testing
    pub radius: f64,
    pub stroke_width: f64,
    /// Whether the icon turns with the asset's heading
    pub rotates: bool,
}

pub static AIR_ICON: Icon = Icon {
    path: "M0,-8 L1.5,-6 L1.5,-2 L10,2 L10,4 L1.5,2 L1.5,7 L5,10 L5,11 L0,10 L-5,11 L-5,10 L-1.5,7 L-1.5,2 L-10,4 L-10,2 L-1.5,-2 L-1.5,-6 Z",
    outline: &[&[
        (0.0, -8.0), (1.5, -6.0), (1.5, -2.0), (10.0, 2.0), (10.0, 4.0), (1.5, 2.0),
        (1.5, 7.0), (5.0, 10.0), (5.0, 11.0), (0.0, 10.0), (-5.0, 11.0), (-5.0, 10.0),
        (-1.5, 7.0), (-1.5, 2.0), (-10.0, 4.0), (-10.0, 2.0), (-1.5, -2.0), (-1.5, -6.0),
    ]],
    radius: 12.1,
    stroke_width: 0.4,
    rotates: true,
};

pub static SEA_ICON: Icon = Icon {
    path: "M0,-10 C2.5,-8 4,-4 4,3 L4,10 L0,12 L-4,10 L-4,3 C-4,-4 -2.5,-8 0,-10 Z M-2,1 L2,1 M-1.5,4 L1.5,4",
    outline: &[&[
        (0.0, -10.0), (2.5, -8.0), (4.0, -4.0), (4.0, 3.0), (4.0, 10.0), (0.0, 12.0),
        (-4.0, 10.0), (-4.0, 3.0), (-4.0, -4.0), (-2.5, -8.0),
    ]],
    radius: 12.0,
    stroke_width: 0.4,
    rotates: true,
};

pub static GROUND_ICON: Icon = Icon {
    path: "M-7,-5 L7,-5 L8,2 L8,6 L-8,6 L-8,2 Z M-4,-1 L4,-1 L4,-8 L-4,-8 Z M0,-12 L0,-8",
    outline: &[
        &[(-7.0, -5.0), (7.0, -5.0), (8.0, 2.0), (8.0, 6.0), (-8.0, 6.0), (-8.0, 2.0)],
        &[(-4.0, -1.0), (4.0, -1.0), (4.0, -8.0), (-4.0, -8.0)],
    ],
    radius: 12.0,
    stroke_width: 0.5,
    rotates: false,
};

pub fn icon_for(class: AssetClass) -> &'static Icon {
    match class {
        AssetClass::Air => &AIR_ICON,
        AssetClass::Sea => &SEA_ICON,
        AssetClass::Ground => &GROUND_ICON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ground_is_fixed() {
        assert!(icon_for(AssetClass::Air).rotates);
        assert!(icon_for(AssetClass::Sea).rotates);
        assert!(!icon_for(AssetClass::Ground).rotates);
    }

    #[test]
    fn test_outline_within_radius() {
        for icon in [&AIR_ICON, &SEA_ICON, &GROUND_ICON] {
            for ring in icon.outline {
                for (x, y) in ring.iter() {
                    assert!((x * x + y * y).sqrt() <= icon.radius);
                }
            }
        }
    }
}
