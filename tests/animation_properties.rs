use proptest::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tailmotion::easing::Easing;
use tailmotion::{
    animate_value, create_text_rotator, format_number, get_easing, tm, AnimateValueOptions,
    FlipEvent, Scheduler, TextRotatorOptions, TmModifiers, VirtualClock,
};

fn run_animation(
    from: f64,
    to: f64,
    duration: f64,
    easing: Easing,
    frame_interval: f64,
) -> (Vec<(f64, f64)>, u32) {
    let clock = Rc::new(VirtualClock::with_frame_interval(frame_interval));
    let updates = Rc::new(RefCell::new(Vec::new()));
    let completions = Rc::new(Cell::new(0u32));

    let (log, done) = (updates.clone(), completions.clone());
    let options = AnimateValueOptions::new(to)
        .from(from)
        .duration(duration)
        .easing(easing)
        .on_update(move |value, progress| log.borrow_mut().push((value, progress)))
        .on_complete(move || done.set(done.get() + 1));
    animate_value(clock.clone(), options);

    clock.run_frames(100_000);
    let updates = updates.borrow().clone();
    (updates, completions.get())
}

proptest! {
    #[test]
    fn progress_is_monotonic_and_ends_at_one(
        from in -10_000.0f64..10_000.0,
        to in -10_000.0f64..10_000.0,
        duration in 1.0f64..5_000.0,
        frame_interval in 1.0f64..100.0,
        easing_index in 0usize..Easing::ALL.len(),
    ) {
        let (updates, completions) = run_animation(from, to, duration, Easing::ALL[easing_index], frame_interval);

        prop_assert!(!updates.is_empty());
        prop_assert!(updates.windows(2).all(|pair| pair[0].1 <= pair[1].1));
        prop_assert!(updates.iter().all(|(_, progress)| (0.0..=1.0).contains(progress)));

        let (last_value, last_progress) = *updates.last().unwrap();
        prop_assert_eq!(last_progress, 1.0);
        prop_assert!((last_value - to).abs() < 1e-9);
        prop_assert_eq!(completions, 1);
        prop_assert_eq!(updates.iter().filter(|(_, p)| *p == 1.0).count(), 1);
    }

    #[test]
    fn zero_duration_completes_in_one_update(
        to in -1e6f64..1e6,
        duration in -1_000.0f64..=0.0,
    ) {
        let (updates, completions) = run_animation(0.0, to, duration, Easing::EaseOutExpo, 16.0);
        prop_assert_eq!(updates.len(), 1);
        prop_assert_eq!(updates[0].1, 1.0);
        prop_assert_eq!(completions, 1);
    }

    #[test]
    fn easing_curves_are_anchored(easing_index in 0usize..Easing::ALL.len()) {
        let easing = Easing::ALL[easing_index];
        prop_assert!((easing.apply(1.0) - 1.0).abs() < 1e-9);
        prop_assert!(easing.apply(0.0).abs() < 1e-3);
    }

    #[test]
    fn go_to_always_lands_in_range(target in any::<i32>(), len in 2usize..12) {
        let clock = Rc::new(VirtualClock::new());
        let words: Vec<String> = (0..len).map(|i| format!("w{}", i)).collect();
        let rotator = create_text_rotator(clock, TextRotatorOptions::new(words).on_flip(|_| {})).unwrap();

        rotator.go_to(target as i64);
        let expected = (target as i64).rem_euclid(len as i64) as usize;
        prop_assert_eq!(rotator.current_index(), expected);
    }

    #[test]
    fn format_number_round_trips_integers(n in -1_000_000_000_000i64..1_000_000_000_000) {
        let formatted = format_number(n as f64, ",");
        let digits: String = formatted.chars().filter(|c| *c != ',').collect();
        prop_assert_eq!(digits.parse::<i64>().unwrap(), n);
        prop_assert!(formatted.split(',').skip(1).all(|group| group.len() == 3));
    }
}

#[test]
fn test_easing_lookup() {
    assert_eq!(get_easing("linear").apply(0.5), 0.5);
    assert_eq!(get_easing("bogus"), get_easing("easeOutExpo"));
    assert_eq!(get_easing(""), Easing::EaseOutExpo);
}

#[test]
fn test_tm_class_string() {
    let modifiers = TmModifiers::new().duration(300).repeat("infinite");
    assert_eq!(tm("bounce", &modifiers), "tm-bounce tm-duration-300 tm-repeat-infinite");
}

#[test]
fn test_cancel_before_first_frame() {
    let clock = Rc::new(VirtualClock::new());
    let calls = Rc::new(Cell::new(0));
    let (updates, completes) = (calls.clone(), calls.clone());
    let handle = animate_value(
        clock.clone(),
        AnimateValueOptions::new(10.0)
            .on_update(move |_, _| updates.set(updates.get() + 1))
            .on_complete(move || completes.set(completes.get() + 100)),
    );

    handle.cancel();
    clock.advance(5_000.0);
    assert_eq!(calls.get(), 0);
    assert_eq!(clock.pending_frames(), 0);
}

#[test]
fn test_cancel_after_completion_is_harmless() {
    let clock = Rc::new(VirtualClock::new());
    let completed = Rc::new(Cell::new(0));
    let done = completed.clone();
    let handle = animate_value(
        clock.clone(),
        AnimateValueOptions::new(1.0)
            .duration(50.0)
            .on_update(|_, _| {})
            .on_complete(move || done.set(done.get() + 1)),
    );

    clock.advance(1_000.0);
    handle.cancel();
    handle.cancel();
    assert_eq!(completed.get(), 1);
    assert!(!handle.is_active());
}

#[test]
fn test_non_looping_rotator_halts() {
    let clock = Rc::new(VirtualClock::new());
    let events: Rc<RefCell<Vec<FlipEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let log = events.clone();
    let rotator = create_text_rotator(
        clock.clone(),
        TextRotatorOptions::new(["a", "b", "c"])
            .interval(100.0)
            .looping(false)
            .on_flip(move |event| log.borrow_mut().push(event.clone())),
    )
    .unwrap();
    rotator.start();

    clock.advance(1_000.0);
    let words: Vec<_> = events.borrow().iter().map(|e| e.word.clone()).collect();
    assert_eq!(words, ["a", "b", "c"]);
    assert!(!rotator.is_running());
    assert_eq!(clock.pending_timers(), 0);
    assert!(clock.now() >= 1_000.0);
}

#[test]
fn test_go_to_wraps() {
    let clock = Rc::new(VirtualClock::new());
    let rotator =
        create_text_rotator(clock, TextRotatorOptions::new(["a", "b", "c"]).on_flip(|_| {})).unwrap();

    rotator.go_to(5);
    assert_eq!(rotator.current_index(), 2);
    rotator.go_to(-1);
    assert_eq!(rotator.current_index(), 2);
    rotator.next();
    assert_eq!(rotator.current_word(), "a");
}
