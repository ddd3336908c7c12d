use shapley::{ValueFunction, compute_shapley_values};

/// The crew team game: five rowers (1-5) and a coxswain (6). Every coalition
/// is worth 0 except the five-rower boat (worth 2), each four-rowers-plus-
/// coxswain boat (worth 10), and the full crew (worth 10).
fn crew_game() -> (Vec<u32>, ValueFunction<u32>) {
    let players: Vec<u32> = (1..=6).collect();

    let mut vf = ValueFunction::new();
    for mask in 1u32..(1 << 6) {
        let members: Vec<u32> = players
            .iter()
            .copied()
            .filter(|p| mask & (1 << (p - 1)) != 0)
            .collect();
        vf.insert(members, 0.0);
    }

    vf.insert(vec![1, 2, 3, 4, 5], 2.0);
    vf.insert(vec![1, 2, 3, 4, 6], 10.0);
    vf.insert(vec![1, 2, 3, 5, 6], 10.0);
    vf.insert(vec![1, 2, 4, 5, 6], 10.0);
    vf.insert(vec![1, 3, 4, 5, 6], 10.0);
    vf.insert(vec![2, 3, 4, 5, 6], 10.0);
    vf.insert(vec![1, 2, 3, 4, 5, 6], 10.0);

    (players, vf)
}

#[test]
fn test_crew_values_sum_to_grand_coalition() {
    let (players, vf) = crew_game();
    let output = compute_shapley_values(players, vf).unwrap();

    assert_eq!(output.len(), 6);
    let total: f64 = output.values().map(|sv| sv.value).sum();
    assert!(
        (total - 10.0).abs() < 1e-9,
        "values should sum to the grand coalition worth 10, got {total}"
    );
}

#[test]
fn test_rowers_are_symmetric() {
    let (players, vf) = crew_game();
    let output = compute_shapley_values(players, vf).unwrap();

    let first = output[&1].value;
    for rower in 2..=5u32 {
        assert!(
            (output[&rower].value - first).abs() < 1e-12,
            "rowers are interchangeable; got {} vs {}",
            output[&rower].value,
            first
        );
    }
}

#[test]
fn test_crew_closed_form_split() {
    // By hand: a rower completes the rowers-only boat (marginal 2) or one of
    // four coxswain boats (marginal 10 each), all at prefix size 4, giving
    // (2 + 40) / 30 = 1.4. The coxswain collects 8 when arriving last and 10
    // when completing any of the five coxswain boats, giving 3.0.
    let (players, vf) = crew_game();
    let output = compute_shapley_values(players, vf).unwrap();

    for rower in 1..=5u32 {
        assert!(
            (output[&rower].value - 1.4).abs() < 1e-9,
            "rower {rower}: expected 1.4, got {}",
            output[&rower].value
        );
    }
    assert!(
        (output[&6].value - 3.0).abs() < 1e-9,
        "coxswain: expected 3.0, got {}",
        output[&6].value
    );
}

#[test]
fn test_coxswain_outranks_each_rower() {
    let (players, vf) = crew_game();
    let output = compute_shapley_values(players, vf).unwrap();

    for rower in 1..=5u32 {
        assert!(output[&6].value > output[&rower].value);
    }
}
