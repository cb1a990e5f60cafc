//! Blue → cyan → green → yellow gradient used for mosaic legends.

use mosaic_model::Rgb;

const STOPS: [(f64, Rgb); 6] = [
    (0.00, Rgb::new(0, 0, 120)),
    (0.20, Rgb::new(0, 70, 255)),
    (0.40, Rgb::new(0, 220, 255)),
    (0.60, Rgb::new(120, 255, 200)),
    (0.80, Rgb::new(255, 255, 140)),
    (1.00, Rgb::new(255, 230, 0)),
];

/// Samples the gradient at `t`, clamped to `[0, 1]`.
pub fn color_at(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);

    for pair in STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t >= t0 && t <= t1 {
            let u = (t - t0) / (t1 - t0);
            return Rgb::new(lerp(c0.r, c1.r, u), lerp(c0.g, c1.g, u), lerp(c0.b, c1.b, u));
        }
    }

    STOPS[STOPS.len() - 1].1
}

/// `n` colors sampled at the centre of each of `n` equal sub-intervals.
pub fn discrete_colors(n: usize) -> Vec<Rgb> {
    (0..n)
        .map(|i| color_at((i as f64 + 0.5) / n as f64))
        .collect()
}

fn lerp(a: u8, b: u8, u: f64) -> u8 {
    let v = f64::from(a) + (f64::from(b) - f64::from(a)) * u;
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_stops_exactly() {
        assert_eq!(color_at(0.0), Rgb::new(0, 0, 120));
        assert_eq!(color_at(0.4), Rgb::new(0, 220, 255));
        assert_eq!(color_at(1.0), Rgb::new(255, 230, 0));
    }

    #[test]
    fn clamps_out_of_range_inputs() {
        assert_eq!(color_at(-3.0), color_at(0.0));
        assert_eq!(color_at(7.0), color_at(1.0));
    }

    #[test]
    fn interpolates_between_stops() {
        // halfway between (0,0,120) and (0,70,255)
        assert_eq!(color_at(0.1), Rgb::new(0, 35, 188));
    }

    #[test]
    fn discrete_colors_sample_bin_centres() {
        let colors = discrete_colors(12);
        assert_eq!(colors.len(), 12);
        assert_eq!(colors[0], color_at(0.5 / 12.0));
        assert_eq!(colors[11], color_at(11.5 / 12.0));
        assert!(discrete_colors(0).is_empty());
    }
}
