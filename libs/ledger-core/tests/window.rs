use ledger_core::{compute_window, encode_cursor, PageArgs, PageError, PageLimits, Window};

fn limits() -> PageLimits {
    PageLimits::new(1000, 1000)
}

fn win(offset: u64, limit: u64) -> Window {
    Window { offset, limit }
}

#[test]
fn no_arguments_returns_default_window() {
    let w = compute_window(&PageArgs::default(), 42, limits()).unwrap();
    assert_eq!(w, win(0, 1000));

    let w = compute_window(&PageArgs::default(), 42, PageLimits::new(10, 50)).unwrap();
    assert_eq!(w, win(0, 10));
}

#[test]
fn first_pages_forward_from_cursor() {
    assert_eq!(
        compute_window(&PageArgs::first(3), 10, limits()).unwrap(),
        win(0, 3)
    );
    assert_eq!(
        compute_window(&PageArgs::first(3).after(encode_cursor(2)), 10, limits()).unwrap(),
        win(3, 3)
    );
}

#[test]
fn first_is_clamped_to_max() {
    let w = compute_window(&PageArgs::first(5000), 10, PageLimits::new(20, 100)).unwrap();
    assert_eq!(w, win(0, 100));
}

#[test]
fn first_zero_is_an_empty_window() {
    assert_eq!(
        compute_window(&PageArgs::first(0), 10, limits()).unwrap(),
        win(0, 0)
    );
}

#[test]
fn after_the_last_row_is_an_empty_page_not_an_error() {
    let w = compute_window(&PageArgs::first(5).after(encode_cursor(9)), 10, limits()).unwrap();
    assert_eq!(w.offset, 10);

    // Cursor far beyond the end is clamped to total.
    let w = compute_window(&PageArgs::first(5).after(encode_cursor(500)), 10, limits()).unwrap();
    assert_eq!(w.offset, 10);
}

#[test]
fn last_pages_backward_from_end() {
    assert_eq!(
        compute_window(&PageArgs::last(3), 10, limits()).unwrap(),
        win(7, 3)
    );
    assert_eq!(
        compute_window(&PageArgs::last(3).before(encode_cursor(5)), 10, limits()).unwrap(),
        win(2, 3)
    );
}

#[test]
fn last_larger_than_available_starts_at_zero() {
    assert_eq!(
        compute_window(&PageArgs::last(8).before(encode_cursor(3)), 10, limits()).unwrap(),
        win(0, 3)
    );
    assert_eq!(
        compute_window(&PageArgs::last(5), 2, limits()).unwrap(),
        win(0, 2)
    );
}

#[test]
fn first_with_before_does_not_cross_the_before_cursor() {
    let args = PageArgs::first(10)
        .after(encode_cursor(1))
        .before(encode_cursor(5));
    assert_eq!(compute_window(&args, 10, limits()).unwrap(), win(2, 3));
}

#[test]
fn after_past_before_yields_empty_window() {
    let args = PageArgs::first(10)
        .after(encode_cursor(6))
        .before(encode_cursor(3));
    let w = compute_window(&args, 10, limits()).unwrap();
    assert_eq!(w.limit, 0);
    assert!(w.offset <= 10);
}

#[test]
fn empty_result_set() {
    assert_eq!(
        compute_window(&PageArgs::first(10), 0, limits()).unwrap(),
        win(0, 10)
    );
    assert_eq!(
        compute_window(&PageArgs::last(10), 0, limits()).unwrap(),
        win(0, 0)
    );
}

#[test]
fn invalid_arguments() {
    let both = PageArgs {
        first: Some(1),
        last: Some(1),
        ..Default::default()
    };
    assert_eq!(
        compute_window(&both, 10, limits()),
        Err(PageError::FirstAndLast)
    );
    assert_eq!(
        compute_window(&PageArgs::first(-1), 10, limits()),
        Err(PageError::NegativeFirst(-1))
    );
    assert_eq!(
        compute_window(&PageArgs::last(-2), 10, limits()),
        Err(PageError::NegativeLast(-2))
    );
    assert!(matches!(
        compute_window(&PageArgs::first(1).after("%%%"), 10, limits()),
        Err(PageError::InvalidCursor(_))
    ));
}

#[test]
fn window_never_leaves_the_result_set() {
    let totals = [0u64, 1, 7, 25];
    let sizes = [None, Some(0i64), Some(1), Some(4), Some(30)];
    let cursors = [None, Some(0u64), Some(3), Some(6), Some(40)];

    for &total in &totals {
        for &first in &sizes {
            for &last in &sizes {
                if first.is_some() && last.is_some() {
                    continue;
                }
                for &after in &cursors {
                    for &before in &cursors {
                        let args = PageArgs {
                            first,
                            last,
                            after: after.map(encode_cursor),
                            before: before.map(encode_cursor),
                        };
                        let w = compute_window(&args, total, limits()).unwrap();
                        assert!(w.offset <= total, "{args:?} total={total} -> {w:?}");
                        let again = compute_window(&args, total, limits()).unwrap();
                        assert_eq!(w, again);
                    }
                }
            }
        }
    }
}

#[test]
fn validate_matches_compute_window_errors() {
    assert!(PageArgs::first(5).after(encode_cursor(3)).validate().is_ok());
    assert_eq!(
        PageArgs::last(-1).validate(),
        Err(PageError::NegativeLast(-1))
    );
    assert!(matches!(
        PageArgs::default().before("???").validate(),
        Err(PageError::InvalidCursor(_))
    ));
}
