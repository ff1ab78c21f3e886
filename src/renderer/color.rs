use serde::Deserialize;

/// Number of curl buckets; palettes hold `N_COLORS + 1` entries.
pub const N_COLORS: usize = 400;

/// Selects which color palette to use for curl rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMap {
    /// Jet: dark blue -> blue -> cyan -> yellow -> red -> dark red.
    #[default]
    Jet,
    /// Blue-White-Red: diverging colormap for signed data (vorticity etc).
    BlueWhiteRed,
}

/// Jet stops as (position, rgb). Negative curl is blue, zero green, positive red.
const JET_STOPS: [(f64, (f64, f64, f64)); 6] = [
    (0.0, (0.0, 0.0, 127.5)),
    (0.125, (0.0, 0.0, 255.0)),
    (0.375, (0.0, 255.0, 255.0)),
    (0.625, (255.0, 255.0, 0.0)),
    (0.875, (255.0, 0.0, 0.0)),
    (1.0, (127.5, 0.0, 0.0)),
];

/// Blue-White-Red diverging colormap: deep blue -> blue -> white -> red -> deep red.
const BLUE_WHITE_RED_STOPS: [(f64, (f64, f64, f64)); 5] = [
    (0.0, (10.0, 30.0, 150.0)),   // deep blue
    (0.25, (80.0, 130.0, 230.0)), // medium blue
    (0.5, (245.0, 245.0, 245.0)), // near white
    (0.75, (230.0, 100.0, 70.0)), // medium red
    (1.0, (150.0, 20.0, 20.0)),   // deep red
];

/// Convert a [0.0, 1.0] value to RGB using the specified color map.
pub fn map_to_rgb(t: f64, colormap: ColorMap) -> [u8; 3] {
    let stops: &[(f64, (f64, f64, f64))] = match colormap {
        ColorMap::Jet => &JET_STOPS,
        ColorMap::BlueWhiteRed => &BLUE_WHITE_RED_STOPS,
    };

    let t = t.clamp(0.0, 1.0);
    let i = stops
        .windows(2)
        .position(|w| t <= w[1].0)
        .unwrap_or(stops.len() - 2);
    let (p0, (r0, g0, b0)) = stops[i];
    let (p1, (r1, g1, b1)) = stops[i + 1];
    let s = (t - p0) / (p1 - p0);

    [
        (r0 + s * (r1 - r0)).round() as u8,
        (g0 + s * (g1 - g0)).round() as u8,
        (b0 + s * (b1 - b0)).round() as u8,
    ]
}

/// Bucket for a curl value: `clamp(round(N * (curl * 5 * contrast + 0.5)), 0, N)`.
/// NaN falls in the middle bucket (zero curl).
pub fn colour_index(curl: f64, contrast: f64) -> usize {
    let v = (N_COLORS as f64 * (curl * 5.0 * contrast + 0.5)).round();
    if v.is_nan() {
        return N_COLORS / 2;
    }
    v.clamp(0.0, N_COLORS as f64) as usize
}

/// Precomputed bucket -> RGB table, built once per renderer.
pub struct Palette {
    colours: Vec<[u8; 3]>,
}

impl Palette {
    pub fn new(colormap: ColorMap) -> Self {
        let colours = (0..=N_COLORS)
            .map(|c| map_to_rgb(c as f64 / N_COLORS as f64, colormap))
            .collect();
        Self { colours }
    }

    pub fn colour(&self, index: usize) -> [u8; 3] {
        self.colours[index.min(N_COLORS)]
    }

    pub fn curl_colour(&self, curl: f64, contrast: f64) -> [u8; 3] {
        self.colour(colour_index(curl, contrast))
    }
}
