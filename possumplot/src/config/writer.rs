//! INI serialization logic for converting `ConfigFile` → INI string.

use super::keys::ConfigKey;
use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let get = |key: ConfigKey| key.get(config);

    format!(
        r#"[paths]
; Master range dataset (MDD Didelphimorphia GeoPackage).
; Only needed until it has been split into genus files.
; Download: https://zenodo.org/records/6644198
master = {}
; Directory holding one GeoPackage per genus
shapes_dir = {}
; Directory figures are written to
figures_dir = {}
; Optional land polygons (.geojson, .json or .gpkg) drawn under the ranges,
; e.g. Natural Earth 1:10m land. Leave empty to plot without land.
land = {}

[plot]
; Output size in pixels
width = {}
height = {}
; Width of the intersection hatch lines in pixels
hatch_width = {}
; Colours of the first and second species: a name or #rrggbb
first_color = {}
second_color = {}
; Projection used to decide which range is larger:
;   equal_area   - Lambert cylindrical equal-area (recommended)
;   web_mercator - Web Mercator, inflates high latitudes
projection = {}
; Geometry the second range is trimmed against:
;   original - second minus first; the three layers never overlap
;   trimmed  - second minus (first minus second); keeps the shared area
subtraction = {}
"#,
        get(ConfigKey::PathsMaster),
        get(ConfigKey::PathsShapesDir),
        get(ConfigKey::PathsFiguresDir),
        get(ConfigKey::PathsLand),
        get(ConfigKey::PlotWidth),
        get(ConfigKey::PlotHeight),
        get(ConfigKey::PlotHatchWidth),
        get(ConfigKey::PlotFirstColor),
        get(ConfigKey::PlotSecondColor),
        get(ConfigKey::PlotProjection),
        get(ConfigKey::PlotSubtraction),
    )
}
