//! End-to-end engine tests: classification scenarios, propagation behavior,
//! and degradation on malformed input.

use bigo_engine::{analyze, ComplexityClass};

#[test]
fn constant_guard_clause() {
    let src = "def first(arr):\n    if arr: return arr[0]\n";
    let result = analyze(src);
    let m = result.method("first").unwrap();
    assert_eq!(m.complexity.class, ComplexityClass::Constant);
}

#[test]
fn single_loop_is_linear() {
    let src = "def echo_all(arr):\n    for item in arr:\n        print(item)\n";
    let result = analyze(src);
    assert_eq!(
        result.method("echo_all").unwrap().complexity.class,
        ComplexityClass::Linear
    );
}

#[test]
fn nested_range_loops_are_quadratic() {
    let src = "def bubble(arr):\n    for i in range(len(arr)):\n        for j in range(len(arr) - 1):\n            if arr[j] > arr[j + 1]:\n                arr[j], arr[j + 1] = arr[j + 1], arr[j]\n    return arr\n";
    let result = analyze(src);
    assert_eq!(
        result.method("bubble").unwrap().complexity.class,
        ComplexityClass::Quadratic
    );
}

#[test]
fn merge_sort_with_sibling_merge() {
    let src = concat!(
        "def merge(left, right):\n",
        "    out = []\n",
        "    i = 0\n",
        "    j = 0\n",
        "    while i < len(left) and j < len(right):\n",
        "        if left[i] <= right[j]:\n",
        "            out.append(left[i])\n",
        "            i += 1\n",
        "        else:\n",
        "            out.append(right[j])\n",
        "            j += 1\n",
        "    return out + left[i:] + right[j:]\n",
        "\n",
        "def merge_sort(arr):\n",
        "    if len(arr) <= 1:\n",
        "        return arr\n",
        "    mid = len(arr) // 2\n",
        "    left = merge_sort(arr[:mid])\n",
        "    right = merge_sort(arr[mid:])\n",
        "    return merge(left, right)\n",
    );
    let result = analyze(src);

    assert_eq!(
        result.method("merge_sort").unwrap().complexity.class,
        ComplexityClass::Linearithmic
    );
    assert_eq!(
        result.method("merge").unwrap().complexity.class,
        ComplexityClass::Linear
    );
    assert_eq!(result.hierarchy["merge_sort"], vec!["merge"]);
    assert!(result.hierarchy["merge"].is_empty());
}

#[test]
fn permutation_generator_is_factorial() {
    let src = concat!(
        "def permute(arr):\n",
        "    if len(arr) <= 1:\n",
        "        return [arr]\n",
        "    result = []\n",
        "    for i in range(len(arr)):\n",
        "        rest = arr[:i] + arr[i+1:]\n",
        "        for p in permute(rest):\n",
        "            result.append([arr[i]] + p)\n",
        "    return result\n",
    );
    let result = analyze(src);
    assert_eq!(
        result.method("permute").unwrap().complexity.class,
        ComplexityClass::Factorial
    );
}

#[test]
fn k_ary_recursive_fanout_is_exponential_k() {
    let src = concat!(
        "def spread(arr):\n",
        "    if len(arr) <= 1:\n",
        "        return [arr]\n",
        "    out = []\n",
        "    for branch in spread(arr[1:]):\n",
        "        for item in arr:\n",
        "            out.append(branch + [item])\n",
        "    return out\n",
    );
    let result = analyze(src);
    assert_eq!(
        result.method("spread").unwrap().complexity.class,
        ComplexityClass::ExponentialK
    );
}

#[test]
fn empty_and_function_free_input() {
    for src in ["", "x = 1\n", "# only a comment\n\n"] {
        let result = analyze(src);
        assert!(result.methods.is_empty(), "input {:?}", src);
        assert!(result.hierarchy.is_empty());
    }
}

#[test]
fn class_ordering_is_total_and_canonical() {
    let mut classes = ComplexityClass::ALL.to_vec();
    classes.reverse();
    classes.sort();
    assert_eq!(classes, ComplexityClass::ALL.to_vec());
    assert_eq!(classes.first(), Some(&ComplexityClass::Constant));
    assert_eq!(classes.last(), Some(&ComplexityClass::Factorial));
}

#[test]
fn reanalysis_is_idempotent() {
    let src = concat!(
        "def helper(n):\n",
        "    return n * 2\n",
        "\n",
        "def driver(arr):\n",
        "    out = []\n",
        "    for x in arr:\n",
        "        out.append(helper(x))\n",
        "    return out\n",
    );
    assert_eq!(analyze(src), analyze(src));
}

#[test]
fn propagation_is_monotone() {
    // wrapper is intrinsically constant but calls a quadratic worker.
    let src = concat!(
        "def worker(arr):\n",
        "    for i in range(len(arr)):\n",
        "        for j in range(len(arr)):\n",
        "            arr[i] += arr[j]\n",
        "    return arr\n",
        "\n",
        "def wrapper(arr):\n",
        "    return worker(arr)\n",
    );
    let result = analyze(src);
    let worker = result.method("worker").unwrap();
    let wrapper = result.method("wrapper").unwrap();

    assert_eq!(worker.complexity.class, ComplexityClass::Quadratic);
    assert_eq!(wrapper.complexity.class, ComplexityClass::Quadratic);
    assert!(wrapper.explanation.contains("includes function calls"));
    assert!(wrapper.complexity.confidence <= 95);
    assert!(wrapper.complexity.confidence >= 70);
}

#[test]
fn mutual_recursion_terminates_with_results_for_all() {
    let src = concat!(
        "def is_even(n):\n",
        "    if n == 0:\n",
        "        return True\n",
        "    return is_odd(n - 1)\n",
        "\n",
        "def is_odd(n):\n",
        "    if n == 0:\n",
        "        return False\n",
        "    return is_even(n - 1)\n",
    );
    let result = analyze(src);
    assert!(result.method("is_even").is_some());
    assert!(result.method("is_odd").is_some());
    assert_eq!(result.hierarchy["is_even"], vec!["is_odd"]);
    assert_eq!(result.hierarchy["is_odd"], vec!["is_even"]);
}

#[test]
fn confidence_bounds_hold_across_fixtures() {
    let fixtures = [
        "def a():\n    pass\n",
        "def b(arr):\n    return sorted(arr)\n",
        "def fib(n):\n    if n <= 1:\n        return n\n    return fib(n - 1) + fib(n - 2)\n",
        "def broken(arr)\n    for x in arr:\n        print(x)\n",
    ];
    for src in fixtures {
        for m in analyze(src).methods {
            assert!((10..=100).contains(&m.complexity.confidence), "{}", src);
            assert!((10..=100).contains(&m.space_complexity.confidence));
        }
    }
}

#[test]
fn truncated_function_still_analyzed() {
    let src = "def truncated(arr):\n    total = 0\n    for x in arr:\n        total += x";
    let result = analyze(src);
    let m = result.method("truncated").unwrap();
    assert_eq!(m.complexity.class, ComplexityClass::Linear);
    assert_eq!(m.line_end, 4);
}

#[test]
fn nested_function_complexity_propagates_to_parent() {
    let src = concat!(
        "def outer(arr):\n",
        "    def inner(xs):\n",
        "        for i in range(len(xs)):\n",
        "            for j in range(len(xs)):\n",
        "                xs[i] += xs[j]\n",
        "        return xs\n",
        "    return inner(arr)\n",
    );
    let result = analyze(src);
    assert_eq!(
        result.method("inner").unwrap().complexity.class,
        ComplexityClass::Quadratic
    );
    assert_eq!(
        result.method("outer").unwrap().complexity.class,
        ComplexityClass::Quadratic
    );
    assert_eq!(result.hierarchy["outer"], vec!["inner"]);
}

#[test]
fn space_results_surface_data_structures() {
    let src = concat!(
        "def doubled(arr):\n",
        "    out = []\n",
        "    for x in arr:\n",
        "        out.append(x * 2)\n",
        "    return out\n",
    );
    let result = analyze(src);
    let m = result.method("doubled").unwrap();
    assert_eq!(m.space_complexity.class, ComplexityClass::Linear);
    assert!(m.space_complexity.data_structures.contains("dynamic list growth"));
}

#[test]
fn shadowed_names_keep_both_rows() {
    let src = concat!(
        "def f(arr):\n",
        "    return arr[0]\n",
        "\n",
        "def f(arr):\n",
        "    for x in arr:\n",
        "        print(x)\n",
    );
    let result = analyze(src);
    assert_eq!(result.methods.len(), 2);
    // Name lookup resolves to the last definition.
    assert_eq!(
        result.method("f").unwrap().complexity.class,
        ComplexityClass::Linear
    );
}

#[test]
fn json_round_trip() {
    let src = "def total(arr):\n    return sum(arr)\n";
    let result = analyze(src);
    let json = serde_json::to_string(&result).unwrap();
    let back: bigo_engine::AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result, back);
}
