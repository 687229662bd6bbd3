use super::*;

#[test]
fn test_mean_and_std_dev() {
    let v = [10, 20, 30];
    assert_eq!(format_stat(mean(&v)), "20.00");
    assert_eq!(format_f64_2(sample_std_dev(&v)), "10.00");
    assert_eq!(mean(&[]), None);
    assert_eq!(sample_std_dev(&[5]), 0.0);
    assert_eq!(format_stat(None), "N/A");
}

#[test]
fn test_positional_median() {
    assert_eq!(format_f64_2(positional_median(&[10, 20, 30])), "20.00");
    assert_eq!(format_f64_2(positional_median(&[10, 20, 30, 40])), "25.00");
    assert_eq!(positional_median(&[]), 0.0);
}

#[test]
fn test_positional_median_keeps_input_order() {
    // Not the value-sorted median (which would be 3).
    assert_eq!(positional_median(&[9, 1, 3]), 1.0);
    assert_eq!(positional_median(&[5, 1, 9, 2]), 5.0);
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
}

#[test]
fn test_positional_median_of_huge_values() {
    assert_eq!(positional_median(&[i64::MAX, i64::MAX]), i64::MAX as f64);
}
