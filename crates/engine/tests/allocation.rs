use engine::{Bill, Money, Percent};

fn dinner_for_three() -> (Bill, Vec<String>) {
    let mut bill = Bill::new();
    let alice = bill.add_participant("Alice", None).unwrap();
    let bob = bill.add_participant("Bob", None).unwrap();
    let carol = bill.add_participant("Carol", None).unwrap();

    // A three-way split that does not divide evenly, a two-way split and a
    // single-owner line, to exercise the rounding paths.
    bill.add_item("Tom Yum", Money::new(100_00), 1, None).unwrap();
    bill.add_item(
        "Pad Thai",
        Money::new(12_50),
        2,
        Some(vec![alice.clone(), bob.clone()]),
    )
    .unwrap();
    bill.add_item("Mango Sticky Rice", Money::new(7_77), 1, Some(vec![carol.clone()]))
        .unwrap();

    bill.set_service_charge("10".parse().unwrap());
    bill.set_tax("7".parse().unwrap());

    (bill, vec![alice, bob, carol])
}

#[test]
fn sequential_surcharge_scenario() {
    let mut bill = Bill::new();
    let solo = bill.add_participant("Solo", None).unwrap();
    bill.add_item("Set Menu", Money::new(100_00), 1, None).unwrap();
    bill.set_service_charge("10".parse().unwrap());
    bill.set_tax("7".parse().unwrap());

    let totals = bill.totals();
    assert_eq!(totals.subtotal, Money::new(100_00));
    assert_eq!(totals.service_charge, Money::new(10_00));
    assert_eq!(totals.after_service_charge, Money::new(110_00));
    assert_eq!(totals.tax, Money::new(7_70));
    assert_eq!(totals.grand_total, Money::new(117_70));

    // A single participant carries the whole bill.
    assert_eq!(bill.participant_totals(&solo).grand_total, Money::new(117_70));
}

#[test]
fn two_way_even_split() {
    let mut bill = Bill::new();
    let a = bill.add_participant("A", None).unwrap();
    let b = bill.add_participant("B", None).unwrap();
    bill.add_item("Platter", Money::new(90_00), 1, None).unwrap();

    for id in [&a, &b] {
        assert_eq!(bill.participant_subtotal(id), Money::new(45_00));
        assert_eq!(bill.participant_totals(id).grand_total, Money::new(45_00));
    }
    assert_eq!(
        bill.participant_totals(&a).grand_total + bill.participant_totals(&b).grand_total,
        bill.totals().grand_total
    );
}

#[test]
fn participant_totals_reconcile_with_grand_total() {
    let (bill, ids) = dinner_for_three();

    let grand_total = bill.totals().grand_total;
    let sum = ids
        .iter()
        .fold(Money::ZERO, |acc, id| acc + bill.participant_totals(id).grand_total);

    // Per-cent rounding may drift by at most a cent per participant.
    let tolerance = ids.len() as i64;
    assert!(
        (sum.cents() - grand_total.cents()).abs() <= tolerance,
        "sum {sum} drifted more than {tolerance} cents from {grand_total}"
    );
}

#[test]
fn item_shares_add_up_to_item_total() {
    let (bill, ids) = dinner_for_three();

    for item in &bill.items {
        let sum = ids
            .iter()
            .fold(Money::ZERO, |acc, id| acc + item.share_of(id));
        let tolerance = item.shared_by.len() as i64;
        assert!(
            (sum.cents() - item.total().cents()).abs() <= tolerance,
            "shares of {} drifted from its total",
            item.name
        );
    }
}

#[test]
fn recomputation_is_stable() {
    let (bill, ids) = dinner_for_three();

    let first = (
        bill.totals(),
        ids.iter().map(|id| bill.participant_totals(id)).collect::<Vec<_>>(),
    );
    let second = (
        bill.totals(),
        ids.iter().map(|id| bill.participant_totals(id)).collect::<Vec<_>>(),
    );
    assert_eq!(first, second);
}

#[test]
fn unclaimed_item_inflates_only_the_bill_total() {
    let (mut bill, ids) = dinner_for_three();
    let before = bill.totals().grand_total;
    let per_person_before: Vec<_> = ids.iter().map(|id| bill.participant_totals(id)).collect();

    bill.add_item("Corkage", Money::new(15_00), 1, Some(Vec::new()))
        .unwrap();

    // The bill grows, nobody's personal total moves, nothing fails.
    assert!(bill.totals().grand_total > before);
    let per_person_after: Vec<_> = ids.iter().map(|id| bill.participant_totals(id)).collect();
    assert_eq!(per_person_before, per_person_after);
}

#[test]
fn removal_cascade_reroutes_shares() {
    let (mut bill, ids) = dinner_for_three();
    let bob = ids[1].clone();

    bill.remove_participant(&bob).unwrap();

    assert!(bill.items.iter().all(|item| !item.is_shared_by(&bob)));
    assert_eq!(bill.participant_subtotal(&bob), Money::ZERO);

    // Tom Yum is now split two ways and Alice carries the Pad Thai alone.
    assert_eq!(bill.participant_subtotal(&ids[0]), Money::new(50_00 + 25_00));
}

#[test]
fn fractional_percentages_round_per_step() {
    let mut bill = Bill::new();
    let solo = bill.add_participant("Solo", None).unwrap();
    bill.add_item("Omakase", Money::new(33_33), 1, None).unwrap();
    bill.set_service_charge(Percent::from_basis_points(1250)); // 12.5%
    bill.set_tax(Percent::from_basis_points(725)); // 7.25%

    let totals = bill.totals();
    // 12.5% of 33.33 = 4.16625 -> 4.17
    assert_eq!(totals.service_charge, Money::new(4_17));
    assert_eq!(totals.after_service_charge, Money::new(37_50));
    // 7.25% of 37.50 = 2.71875 -> 2.72
    assert_eq!(totals.tax, Money::new(2_72));
    assert_eq!(totals.grand_total, Money::new(40_22));
    assert_eq!(bill.participant_totals(&solo).grand_total, Money::new(40_22));
}
