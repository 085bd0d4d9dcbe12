use fb565::{Geometry, Rgb565};
use gbtext_core::{
    Point, Rect, View,
    glyph::{ASCII_CELL_WIDTH, CELL_HEIGHT, WIDE_CELL_WIDTH},
};
use proptest::prelude::*;

const SCREEN: Geometry = Geometry::new(320, 240);

fn glyph_width() -> impl Strategy<Value = usize> {
    prop_oneof![Just(ASCII_CELL_WIDTH), Just(WIDE_CELL_WIDTH)]
}

/// Views whose on-screen part holds at least one wide cell.
fn usable_view() -> impl Strategy<Value = View> {
    (0usize..280, 0usize..200)
        .prop_flat_map(|(x, y)| {
            let max_w = SCREEN.width - x;
            let max_h = SCREEN.height - y;
            (
                Just(x),
                Just(y),
                (WIDE_CELL_WIDTH + 1)..=max_w + 40,
                CELL_HEIGHT..=max_h + 40,
            )
        })
        .prop_map(|(x, y, w, h)| View::new(Rect::new(x, y, w, h), Rgb565::WHITE))
}

proptest! {
    #[test]
    fn resolved_point_fits_a_cell_inside_the_view(
        view in usable_view(),
        dx in 0usize..400,
        dy in 0usize..400,
        width in glyph_width(),
    ) {
        let area = view.area().clip_to(SCREEN).unwrap();
        let candidate = Point::new(area.x + dx, area.y + dy);

        let p = view.resolve(SCREEN, candidate, width).unwrap();

        prop_assert!(p.x >= area.x && p.x < area.right());
        prop_assert!(p.y >= area.y && p.y < area.bottom());
        prop_assert!(p.x + width < area.right());
    }

    #[test]
    fn resolve_is_idempotent(
        view in usable_view(),
        cx in 0usize..640,
        cy in 0usize..480,
        width in glyph_width(),
    ) {
        let once = view.resolve(SCREEN, Point::new(cx, cy), width).unwrap();
        let twice = view.resolve(SCREEN, once, width).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn newlines_cycle_through_the_view(view in usable_view(), steps in 1usize..64) {
        let mut view = view;
        let area = view.area().clip_to(SCREEN).unwrap();

        for _ in 0..steps {
            view.newline(SCREEN).unwrap();
            let cursor = view.cursor();
            prop_assert_eq!(cursor.x, area.x);
            prop_assert!(area.contains(cursor));
        }
    }
}
