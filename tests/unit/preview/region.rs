use super::*;

fn zoomed_region() -> Region {
    let mut region = Region::new(DisplayModel::default());
    region.style.transform = Some(Affine::scale(1.3));
    region
}

#[test]
fn default_style_is_decorated() {
    let style = RegionStyle::default();
    assert!(style.shadow.is_some());
    assert!(style.corner_radius > 0.0);
    assert!(!style.is_neutral());
}

#[test]
fn guard_neutralizes_then_restores() {
    let mut region = zoomed_region();
    let before = region.style;
    {
        let guard = NeutralStyle::apply(&mut region);
        assert!(guard.style.is_neutral());
    }
    assert_eq!(region.style, before);
}

#[test]
fn guard_restores_on_unwind() {
    let mut region = zoomed_region();
    let before = region.style;
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = NeutralStyle::apply(&mut region);
        panic!("snapshot blew up");
    }));
    assert!(result.is_err());
    assert_eq!(region.style, before);
}
