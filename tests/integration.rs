use std::path::{Path, PathBuf};

use promo_palette::pipeline::cluster::{kmeans, Seeding, DEFAULT_ITERATIONS};
use promo_palette::pipeline::extract::{extract_palette, ExtractOptions};
use promo_palette::theme::PromoTheme;
use promo_palette::{assign_roles, hue_distance, Color, ColorRoles, ImageSource};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const RED: Color = Color::new(255, 0, 0);
const BLUE: Color = Color::new(0, 0, 255);

fn save_solid(dir: &Path, name: &str, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_fn(width, height, |_, _| image::Rgb(rgb))
        .save(&path)
        .unwrap();
    path
}

fn save_colorful(dir: &Path) -> PathBuf {
    let path = dir.join("colorful.png");
    let img = image::RgbImage::from_fn(64, 64, |x, y| {
        let region = (x / 16) + (y / 16) * 4;
        match region % 4 {
            0 => image::Rgb([220, 50, 50]),
            1 => image::Rgb([50, 200, 50]),
            2 => image::Rgb([20, 20, 20]),
            _ => image::Rgb([240, 240, 240]),
        }
    });
    img.save(&path).unwrap();
    path
}

fn is_hex(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
}

/// Which of red/blue the color is closer to.
fn nearest_input(c: Color) -> Color {
    if c.distance_sq(RED) <= c.distance_sq(BLUE) {
        RED
    } else {
        BLUE
    }
}

// ---------------------------------------------------------------------------
// Extraction end to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn red_and_blue_images_separate_into_two_clusters() {
    let dir = tempfile::tempdir().unwrap();
    let red = save_solid(dir.path(), "red.png", 40, 30, [255, 0, 0]);
    let blue = save_solid(dir.path(), "blue.png", 120, 120, [0, 0, 255]);
    let sources = vec![ImageSource::from(red), ImageSource::from(blue)];

    // Random seeding may draw both seeds from one image; the empty centroid
    // then keeps its seed and picks up the other color on the next round.
    for _ in 0..10 {
        let palette = extract_palette(&sources, &ExtractOptions::with_clusters(2))
            .await
            .unwrap();
        assert_eq!(palette.len(), 2);
        let mapped: Vec<Color> = palette.iter().map(|c| nearest_input(*c)).collect();
        assert_ne!(mapped[0], mapped[1], "both centroids collapsed: {palette:?}");
        for (c, target) in palette.iter().zip(&mapped) {
            assert!(c.distance_sq(*target) <= 12, "{c} is not close to {target}");
        }
    }
}

#[tokio::test]
async fn palette_has_k_well_formed_colors() {
    let dir = tempfile::tempdir().unwrap();
    let sources = vec![ImageSource::from(save_colorful(dir.path()))];
    for k in [1, 3, 5, 8] {
        let palette = extract_palette(&sources, &ExtractOptions::with_clusters(k))
            .await
            .unwrap();
        assert_eq!(palette.len(), k);
        for c in &palette {
            assert!(is_hex(&c.to_hex()), "malformed hex {c}");
        }
    }
}

#[tokio::test]
async fn failing_sources_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let green = save_solid(dir.path(), "green.png", 10, 10, [0, 200, 0]);
    let bogus = dir.path().join("not_an_image.txt");
    std::fs::write(&bogus, "this is not an image").unwrap();

    let sources = vec![
        ImageSource::from(bogus),
        ImageSource::from(dir.path().join("missing.png")),
        ImageSource::from(green),
    ];
    let opts = ExtractOptions {
        clusters: 2,
        seeding: Seeding::Seeded(3),
        ..ExtractOptions::default()
    };
    let palette = extract_palette(&sources, &opts).await.unwrap();
    for c in &palette {
        assert!(c.distance_sq(Color::new(0, 200, 0)) <= 3, "unexpected {c}");
    }
}

#[tokio::test]
async fn unreachable_url_is_skipped_next_to_valid_image() {
    let dir = tempfile::tempdir().unwrap();
    let orange = save_solid(dir.path(), "orange.png", 12, 12, [240, 130, 20]);
    let sources = vec![
        ImageSource::Url("http://127.0.0.1:1/x.png".into()),
        ImageSource::from(orange),
    ];
    let opts = ExtractOptions {
        clusters: 3,
        seeding: Seeding::Seeded(11),
        ..ExtractOptions::default()
    };
    let palette = extract_palette(&sources, &opts).await.unwrap();
    assert_eq!(palette.len(), 3);
    for c in &palette {
        assert!(c.distance_sq(Color::new(240, 130, 20)) <= 3, "unexpected {c}");
    }
}

#[tokio::test]
async fn all_sources_failing_matches_empty_pool() {
    let dir = tempfile::tempdir().unwrap();
    let sources = vec![
        ImageSource::from(dir.path().join("a.png")),
        ImageSource::from(dir.path().join("b.png")),
    ];
    let palette = extract_palette(&sources, &ExtractOptions::with_clusters(4))
        .await
        .unwrap();
    let empty_pool = kmeans(&[], 4, DEFAULT_ITERATIONS, Seeding::Random).unwrap();
    assert_eq!(palette, empty_pool);
    assert!(palette.iter().all(|c| c.to_hex() == "#c8c8c8"));
}

#[tokio::test]
async fn only_first_six_sources_are_sampled() {
    let dir = tempfile::tempdir().unwrap();
    let mut sources: Vec<ImageSource> = (0..6)
        .map(|i| ImageSource::from(save_solid(dir.path(), &format!("g{i}.png"), 8, 8, [0, 180, 0])))
        .collect();
    sources.push(ImageSource::from(save_solid(dir.path(), "late.png", 8, 8, [255, 0, 255])));

    let opts = ExtractOptions {
        clusters: 3,
        seeding: Seeding::Spread,
        ..ExtractOptions::default()
    };
    let palette = extract_palette(&sources, &opts).await.unwrap();
    for c in &palette {
        assert!(c.distance_sq(Color::new(0, 180, 0)) <= 3, "seventh image leaked: {c}");
    }
}

#[tokio::test]
async fn spread_seeding_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let sources = vec![ImageSource::from(save_colorful(dir.path()))];
    let opts = ExtractOptions {
        clusters: 4,
        seeding: Seeding::Spread,
        ..ExtractOptions::default()
    };
    let a = extract_palette(&sources, &opts).await.unwrap();
    let b = extract_palette(&sources, &opts).await.unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Role assignment
// ---------------------------------------------------------------------------

#[test]
fn empty_palette_roles_are_fallback_constants() {
    let roles = assign_roles(&[]);
    assert_eq!(roles.primary.to_hex(), "#5468ff");
    assert_eq!(roles.accent.to_hex(), "#ff4d6d");
    assert_eq!(roles.neutral.to_hex(), "#111827");
}

#[test]
fn mid_gray_fills_every_role() {
    let gray = Color::from_hex("#808080").unwrap();
    let roles = assign_roles(&[gray]);
    assert_eq!(
        roles,
        ColorRoles {
            primary: gray,
            accent: gray,
            neutral: gray
        }
    );
}

#[tokio::test]
async fn extracted_palette_feeds_theme() {
    let dir = tempfile::tempdir().unwrap();
    let sources = vec![ImageSource::from(save_colorful(dir.path()))];
    let opts = ExtractOptions {
        clusters: 4,
        seeding: Seeding::Spread,
        ..ExtractOptions::default()
    };
    let theme = PromoTheme::from_palette(extract_palette(&sources, &opts).await.unwrap());
    for role in [theme.roles.primary, theme.roles.accent, theme.roles.neutral] {
        assert!(theme.palette.contains(&role));
    }
    let css = theme.to_css();
    assert!(css.contains(&format!("--brand: {};", theme.roles.primary)));
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_color() -> impl Strategy<Value = Color> {
        proptest::array::uniform3(0u8..=255u8).prop_map(|[r, g, b]| Color::new(r, g, b))
    }

    proptest! {
        #[test]
        fn kmeans_returns_k_pool_bounded_colors(
            pixels in proptest::collection::vec(arb_color(), 1..200),
            k in 1usize..8,
            seed in any::<u64>(),
        ) {
            let centroids = kmeans(&pixels, k, DEFAULT_ITERATIONS, Seeding::Seeded(seed)).unwrap();
            prop_assert_eq!(centroids.len(), k);
            let min_r = pixels.iter().map(|p| p.r).min().unwrap();
            let max_r = pixels.iter().map(|p| p.r).max().unwrap();
            for c in &centroids {
                prop_assert!(is_hex(&c.to_hex()));
                prop_assert!(c.r >= min_r && c.r <= max_r);
            }
        }

        #[test]
        fn roles_are_palette_members(palette in proptest::collection::vec(arb_color(), 1..10)) {
            let roles = assign_roles(&palette);
            prop_assert!(palette.contains(&roles.primary));
            prop_assert!(palette.contains(&roles.accent));
            prop_assert!(palette.contains(&roles.neutral));
            prop_assert_eq!(roles, assign_roles(&palette));
        }

        #[test]
        fn neutral_is_darkest(palette in proptest::collection::vec(arb_color(), 1..10)) {
            let roles = assign_roles(&palette);
            let neutral_l = roles.neutral.to_hsl().lightness;
            for c in &palette {
                prop_assert!(neutral_l <= c.to_hsl().lightness);
            }
        }

        #[test]
        fn hue_distance_symmetric(a in 0f32..1.0, b in 0f32..1.0) {
            prop_assert_eq!(hue_distance(a, b), hue_distance(b, a));
            prop_assert_eq!(hue_distance(a, a), 0.0);
            prop_assert!(hue_distance(a, b) <= 0.5 + f32::EPSILON);
        }
    }

    #[test]
    fn hue_distance_wraps() {
        assert!(hue_distance(0.98, 0.01) < 0.1);
    }
}
