use field_core::*;

#[test]
fn first_valid_frame_creates_sample() {
    let mut s = Signals::default();
    assert!(s.amplitude.is_none());
    s.push_amplitude(&[0.25, -0.25]).expect("valid frame");
    let a = s.amplitude.as_ref().expect("sample stored");
    assert_eq!(a.values(), &[0.25, -0.25]);
    assert!((a.mean_abs() - 0.25).abs() < 1e-6);
}

#[test]
fn non_finite_frame_keeps_previous_sample() {
    let mut s = Signals::default();
    s.push_amplitude(&[0.5; 4]).expect("valid frame");
    let err = s.push_amplitude(&[0.1, f32::NAN, 0.2]).unwrap_err();
    assert_eq!(err, SignalError::NonFinite { index: 1 });
    let err = s.push_amplitude(&[f32::INFINITY]).unwrap_err();
    assert_eq!(err, SignalError::NonFinite { index: 0 });
    assert_eq!(s.amplitude.as_ref().map(AmplitudeSample::len), Some(4));
    assert_eq!(s.amplitude.as_ref().map(AmplitudeSample::values), Some(&[0.5; 4][..]));
}

#[test]
fn empty_frame_is_rejected() {
    let mut s = Signals::default();
    assert_eq!(s.push_amplitude(&[]), Err(SignalError::EmptySample));
    assert!(s.amplitude.is_none());
}

#[test]
fn out_of_range_values_are_clamped() {
    let mut s = Signals::default();
    s.push_amplitude(&[3.0, -7.5, 0.5]).expect("finite frame");
    let a = s.amplitude.as_ref().expect("sample stored");
    assert_eq!(a.values(), &[1.0, -1.0, 0.5]);
}

#[test]
fn frames_of_any_length_are_accepted() {
    let mut s = Signals::default();
    s.push_amplitude(&[0.1; 1024]).expect("full frame");
    s.push_amplitude(&[0.2; 3]).expect("short frame");
    assert_eq!(s.amplitude.as_ref().map(AmplitudeSample::len), Some(3));
    s.push_amplitude(&[0.2; 5000]).expect("long frame");
    assert_eq!(s.amplitude.as_ref().map(AmplitudeSample::len), Some(5000));
}

#[test]
fn all_zero_sample_is_distinct_from_absent() {
    let mut s = Signals::default();
    s.push_amplitude(&[0.0; 8]).expect("silent frame");
    let a = s.amplitude.as_ref().expect("silence is still a sample");
    assert_eq!(a.mean_abs(), 0.0);
    s.clear_amplitude();
    assert!(s.amplitude.is_none());
}

#[test]
fn pointer_updates_replace_previous_value() {
    let mut s = Signals::default();
    let vp = Viewport::new(1000, 500, 1.0);
    s.set_pointer(PointerState::from_viewport_px(750.0, 125.0, vp));
    assert_eq!(s.pointer, PointerState::new(0.5, 0.5));
}
