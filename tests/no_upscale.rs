//! Parametric sweep of the no-upscale adjustment and its two entry points.
//!
//! Every target below is paired with a spread of source sizes around it
//! (smaller, equal, off-by-one, larger, extreme aspect ratios). Failures are
//! collected and reported together.

use zencrop::*;

const TARGETS: [(u32, u32); 16] = [
    (500, 500),
    (1200, 630),
    (1024, 512),
    (800, 600),
    (600, 800),
    (1920, 1080),
    (1600, 900),
    (400, 300),
    (100, 33),
    (33, 100),
    (1, 3),
    (3, 1),
    (2, 3),
    (1, 1),
    (17, 1871),
    (1871, 17),
];

fn gen_source_sizes(tw: u32, th: u32) -> Vec<(u32, u32)> {
    fn vary(v: u32) -> Vec<u32> {
        let mut vals = vec![v, v.saturating_add(1), v.saturating_sub(1).max(1)];
        vals.extend([v * 2, v * 3, v * 10]);
        vals.extend([(v / 2).max(1), (v / 3).max(1), (v / 10).max(1)]);
        vals.push(v.next_power_of_two());
        vals.extend([1, 2, 3, 5, 7, 16, 100, 1000]);
        vals.sort_unstable();
        vals.dedup();
        vals
    }

    let mut sizes: Vec<(u32, u32)> = Vec::new();
    for &w in &vary(tw) {
        for &h in &vary(th) {
            sizes.push((w, h));
        }
    }
    // Sources with the target's own ratio, scaled down.
    for d in [2, 3, 7] {
        sizes.push(((tw / d).max(1), (th / d).max(1)));
    }
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

#[test]
fn parametric_invariants() {
    let mut failures = Vec::new();
    let mut checked = 0u64;

    for &(tw, th) in &TARGETS {
        let target = Size::new(tw, th);
        let r = AspectRatio::of(target).unwrap().hundredths() as i128;

        for (sw, sh) in gen_source_sizes(tw, th) {
            let source = Size::new(sw, sh);
            let tag = format!("({sw}x{sh} -> {tw}x{th})");
            let a = match Adjustment::compute(source, target) {
                Ok(a) => a,
                Err(e) => {
                    failures.push(format!("{tag}: error {e:?}"));
                    continue;
                }
            };
            let Size {
                width: ow,
                height: oh,
            } = a.size;

            // Rule selection.
            let expected_case = if sw > tw && sh > th {
                AdjustCase::Unchanged
            } else if sw <= tw && sh <= th {
                if AspectRatio::of(source) == AspectRatio::of(target) {
                    AdjustCase::SourceMatches
                } else if AspectRatio::of(target) > AspectRatio::of(source) {
                    AdjustCase::WidthBound
                } else {
                    AdjustCase::HeightBound
                }
            } else if sw <= tw {
                AdjustCase::WidthBound
            } else {
                AdjustCase::HeightBound
            };
            if a.case != expected_case {
                failures.push(format!("{tag}: case {:?} != {expected_case:?}", a.case));
            }

            match a.case {
                AdjustCase::Unchanged => {
                    if a.size != target {
                        failures.push(format!("{tag}: larger source changed target to {ow}x{oh}"));
                    }
                }
                AdjustCase::SourceMatches => {
                    if a.size != source {
                        failures.push(format!("{tag}: matching ratio gave {ow}x{oh}"));
                    }
                }
                AdjustCase::WidthBound => {
                    if ow != sw {
                        failures.push(format!("{tag}: width-bound output width {ow} != {sw}"));
                    }
                    // |w - h·r| ≤ r/2 unless the height was floored to 1.
                    let raw_zero = 200 * (sw as i128) < r;
                    let err = (100 * ow as i128 - r * oh as i128).abs();
                    if !raw_zero && 2 * err > r {
                        failures.push(format!(
                            "{tag}: {ow}x{oh} strays from ratio {r}/100 by {err}/100"
                        ));
                    }
                }
                AdjustCase::HeightBound => {
                    if oh != sh {
                        failures.push(format!("{tag}: height-bound output height {oh} != {sh}"));
                    }
                    let raw_zero = sh as i128 * r + 50 < 100;
                    let err = (100 * ow as i128 - r * oh as i128).abs();
                    if !raw_zero && err > 50 {
                        failures.push(format!(
                            "{tag}: {ow}x{oh} strays from ratio {r}/100 by {err}/100"
                        ));
                    }
                }
            }

            // A source that fits inside the target is never enlarged.
            if sw <= tw && sh <= th {
                if ow > sw || oh > sh {
                    failures.push(format!("{tag}: {ow}x{oh} exceeds source"));
                }
                match plan_scale_and_crop(source, a.size, Anchor::CENTER) {
                    Ok(plan) => {
                        if plan.resize_to.width > sw || plan.resize_to.height > sh {
                            failures.push(format!("{tag}: plan upscales: {plan:?}"));
                        }
                    }
                    Err(e) => failures.push(format!("{tag}: plan error {e:?}")),
                }
            }

            if adjust(a.size, a.size) != Ok(a.size) {
                failures.push(format!("{tag}: adjusting {ow}x{oh} again changed it"));
            }

            checked += 1;
        }
    }

    assert!(
        failures.is_empty(),
        "Invariant failures ({} of {checked} checked):\n{}",
        failures.len(),
        failures.join("\n")
    );
    assert!(
        checked > 2_500,
        "Only checked {checked} combinations, expected >2,500"
    );
}

#[test]
fn larger_source_keeps_target() {
    assert_eq!(
        adjust(Size::new(1000, 1000), Size::new(500, 500)),
        Ok(Size::new(500, 500))
    );
}

#[test]
fn smaller_square_source_kept() {
    assert_eq!(
        adjust(Size::new(200, 200), Size::new(500, 500)),
        Ok(Size::new(200, 200))
    );
}

#[test]
fn wide_source_limited_by_height() {
    assert_eq!(
        adjust(Size::new(300, 100), Size::new(500, 500)),
        Ok(Size::new(100, 100))
    );
}

#[test]
fn tall_source_limited_by_width() {
    assert_eq!(
        adjust(Size::new(100, 300), Size::new(500, 500)),
        Ok(Size::new(100, 100))
    );
}

#[test]
fn zero_height_source_is_invalid() {
    assert!(matches!(
        adjust(Size::new(100, 0), Size::new(200, 200)),
        Err(AdjustError::InvalidDimension {
            role: Role::Source,
            ..
        })
    ));
}

#[test]
fn rounded_ratio_can_overshoot_free_axis() {
    // 100/300 rounds to 0.33, so the derived height is 100 / 0.33 = 303,
    // taller than the 301px source. Two-decimal rounding is kept as-is.
    assert_eq!(
        adjust(Size::new(100, 301), Size::new(100, 300)),
        Ok(Size::new(100, 303))
    );
}

#[test]
fn predictor_without_height_is_unknown() {
    let effect = ScaleCropEffect::new(500, 500).unwrap();
    let mut hints = DimensionHints {
        width: Some(300),
        height: None,
    };
    effect.transform_dimensions(&mut hints);
    assert_eq!(hints.width, None);
    assert_eq!(hints.height, None);
}

/// Stand-in raster collaborator over a bare size.
struct Toolkit {
    calls: usize,
}

impl ScaleCrop<Size> for Toolkit {
    type Error = core::convert::Infallible;

    fn scale_and_crop(&mut self, image: &mut Size, plan: &CropPlan) -> Result<(), Self::Error> {
        self.calls += 1;
        *image = plan.output();
        Ok(())
    }
}

#[test]
fn effect_sweep_matches_prediction() {
    let mut failures = Vec::new();
    let mut toolkit = Toolkit { calls: 0 };
    let mut transforms = 0;

    for &(tw, th) in &TARGETS[..8] {
        let effect = ScaleCropEffect::new(tw, th).unwrap();
        for (sw, sh) in gen_source_sizes(tw, th) {
            let tag = format!("({sw}x{sh} -> {tw}x{th})");
            let predicted = effect.predict(DimensionHints::new(sw, sh));
            let mut image = Size::new(sw, sh);
            match effect.apply(&mut image, &mut toolkit) {
                Ok(Applied::Skipped) => {
                    if (sw, sh) != (tw, th) {
                        failures.push(format!("{tag}: skipped"));
                    }
                }
                Ok(Applied::Transformed { target, plan }) => {
                    transforms += 1;
                    if plan.output() != target || image != target {
                        failures.push(format!("{tag}: output {image} != target {target}"));
                    }
                    if !plan.crop.fits_within(plan.resize_to.width, plan.resize_to.height) {
                        failures.push(format!("{tag}: crop outside scaled image: {plan:?}"));
                    }
                }
                Err(e) => {
                    failures.push(format!("{tag}: {e}"));
                    continue;
                }
            }
            if predicted.size() != Some(image) {
                failures.push(format!("{tag}: predicted {predicted:?}, got {image}"));
            }
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n"));
    assert_eq!(toolkit.calls, transforms);
}
