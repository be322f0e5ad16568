//! Property-based tests for the transaction machine.
//!
//! These tests use proptest to drive the machine through random event
//! sequences and check that its invariants hold after every step.

use coffee_machine::config::MachineConfig;
use coffee_machine::core::{Coin, Drink, MachineState, Money};
use coffee_machine::machine::{InactivityTimer, MachineError, MachineEvent, TransactionMachine};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    Event(MachineEvent),
    Timeout,
}

prop_compose! {
    fn arbitrary_drink()(variant in 0..2u8) -> Drink {
        match variant {
            0 => Drink::Espresso,
            _ => Drink::Latte,
        }
    }
}

fn arbitrary_coin_entry() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("0.1".to_string()),
        Just("0.5".to_string()),
        Just("1.0".to_string()),
        Just("0.3".to_string()),
        Just("abc".to_string()),
        Just(String::new()),
        "[0-9]{1,2}\\.[0-9]{1,2}",
    ]
}

fn arbitrary_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Event(MachineEvent::PowerToggle)),
        arbitrary_drink().prop_map(|d| Step::Event(MachineEvent::SelectDrink(d))),
        arbitrary_coin_entry().prop_map(|c| Step::Event(MachineEvent::InsertCoin(c))),
        Just(Step::Event(MachineEvent::Refill)),
        Just(Step::Timeout),
    ]
}

fn apply(machine: &mut TransactionMachine, step: Step) {
    match step {
        Step::Event(event) => {
            machine.handle(event);
        }
        Step::Timeout => {
            machine.on_inactivity_timeout();
        }
    }
}

proptest! {
    #[test]
    fn inserted_is_zero_outside_payment(steps in prop::collection::vec(arbitrary_step(), 0..40)) {
        let mut machine = TransactionMachine::new(&MachineConfig::default());

        for step in steps {
            apply(&mut machine, step);
            if machine.state() != MachineState::AwaitingPayment {
                prop_assert_eq!(machine.inserted(), Money::ZERO);
                prop_assert!(machine.selected_drink().is_none());
            } else {
                prop_assert!(machine.selected_drink().is_some());
                let drink = machine.selected_drink().unwrap();
                prop_assert!(machine.inserted() < drink.price());
            }
        }
    }

    #[test]
    fn outcome_actions_match_state(steps in prop::collection::vec(arbitrary_step(), 1..40)) {
        let mut machine = TransactionMachine::new(&MachineConfig::default());

        for step in steps {
            if let Step::Event(event) = step {
                let outcome = machine.handle(event);
                prop_assert_eq!(outcome.state, machine.state());
                prop_assert_eq!(outcome.actions, machine.state().actions());
                prop_assert!(outcome.message.is_some());
            } else {
                machine.on_inactivity_timeout();
            }
        }
    }

    #[test]
    fn timer_armed_only_while_powered(steps in prop::collection::vec(arbitrary_step(), 0..40)) {
        let mut machine = TransactionMachine::new(&MachineConfig::default());

        for step in steps {
            let was_timeout = matches!(step, Step::Timeout);
            apply(&mut machine, step);
            if !machine.state().is_powered() {
                prop_assert!(!machine.timer().is_armed());
            } else if !was_timeout {
                prop_assert!(machine.timer().is_armed());
            }
        }
    }

    #[test]
    fn rejected_events_do_not_change_state(
        steps in prop::collection::vec(arbitrary_step(), 0..40)
    ) {
        let mut machine = TransactionMachine::new(&MachineConfig::default());

        for step in steps {
            let before = (
                machine.state(),
                machine.inserted(),
                machine.selected_drink(),
                machine.resources_available(),
            );
            if let Step::Event(event) = step {
                let outcome = machine.handle(event);
                if outcome.error().is_some() {
                    let after = (
                        machine.state(),
                        machine.inserted(),
                        machine.selected_drink(),
                        machine.resources_available(),
                    );
                    prop_assert_eq!(before, after);
                }
            } else {
                machine.on_inactivity_timeout();
            }
        }
    }

    #[test]
    fn timeout_always_revokes_resources(
        steps in prop::collection::vec(arbitrary_step(), 0..20)
    ) {
        let mut machine = TransactionMachine::new(&MachineConfig::default());
        for step in steps {
            apply(&mut machine, step);
        }

        let powered = machine.state().is_powered();
        let armed = machine.timer().is_armed();
        let outcome = machine.on_inactivity_timeout();

        if powered && armed {
            prop_assert!(outcome.is_some());
            prop_assert_eq!(machine.state(), MachineState::Idle);
            prop_assert!(!machine.resources_available());
            prop_assert_eq!(machine.inserted(), Money::ZERO);
        } else {
            prop_assert!(outcome.is_none());
        }
    }

    #[test]
    fn change_is_paid_minus_price(
        drink in arbitrary_drink(),
        coins in prop::collection::vec(prop::sample::select(Coin::ALL.to_vec()), 1..12)
    ) {
        let mut machine = TransactionMachine::new(&MachineConfig::default());
        machine.power_toggle();
        machine.select_drink(drink);

        let mut paid = Money::ZERO;
        for coin in coins {
            paid += coin.value();
            let outcome = machine.insert_coin(&coin.value().to_string());
            prop_assert!(outcome.is_ok());

            if paid >= drink.price() {
                prop_assert_eq!(outcome.state, MachineState::Idle);
                prop_assert_eq!(outcome.change(), Some(paid.saturating_sub(drink.price())));
                break;
            }
            prop_assert_eq!(outcome.state, MachineState::AwaitingPayment);
            prop_assert_eq!(machine.inserted(), paid);
        }
    }

    #[test]
    fn non_denomination_numbers_are_invalid_coins(value in 0.0f64..10.0) {
        prop_assume!(Coin::from_bd(value).is_none());

        let mut machine = TransactionMachine::new(&MachineConfig::default());
        machine.power_toggle();
        machine.select_drink(Drink::Latte);

        let outcome = machine.insert_coin(&value.to_string());
        let is_invalid_coin = matches!(outcome.error(), Some(MachineError::InvalidCoin { .. }));
        prop_assert!(is_invalid_coin);
        prop_assert_eq!(machine.inserted(), Money::ZERO);
    }
}
