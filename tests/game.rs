//! Game session integration tests.

use std::collections::HashSet;

use bjsession::game::dealer::{DEALER_STANDS_ON, play_dealer};
use bjsession::payout::settle_hand;
use bjsession::{
    ActionError, Card, DECK_SIZE, DealError, DealerHand, GameId, GameOptions, GameSession, Hand,
    HandOutcome, HandStatus, InvalidAction, PayoutRatio, PerHand, PlayerId, Rank, RoundingMode,
    SeededShoes, Shoe, ShoeError, ShoeSource, Suit,
};

const fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn stacked(cards: &[Card]) -> Shoe {
    Shoe::stacked(cards.to_vec()).unwrap()
}

/// Deals a game from `cards` (player, dealer, player, dealer, then draws).
fn deal(cards: &[Card], bet: u64, bankroll: &mut u64, options: &GameOptions) -> GameSession {
    GameSession::deal(
        GameId(1),
        PlayerId(1),
        bet,
        stacked(cards),
        bankroll,
        options,
        0,
    )
    .unwrap()
}

fn hand_of(cards: &[Card], bet: u64) -> Hand {
    let mut hand = Hand::new(bet);
    for &c in cards {
        hand.add_card(c);
    }
    hand
}

fn dealer_of(cards: &[Card]) -> DealerHand {
    let mut dealer = DealerHand::new();
    for &c in cards {
        dealer.add_card(c);
    }
    dealer
}

#[test]
fn aces_count_high_only_when_that_does_not_bust() {
    for a in Rank::ALL {
        for b in Rank::ALL {
            for c in Rank::ALL {
                let ranks = [a, b, c];
                let hand = hand_of(
                    &[
                        card(a, Suit::Spades),
                        card(b, Suit::Hearts),
                        card(c, Suit::Clubs),
                    ],
                    10,
                );

                let hard: u8 = ranks
                    .iter()
                    .map(|rank| if rank.is_ace() { 1 } else { rank.value() })
                    .sum();
                let has_ace = ranks.iter().any(|rank| rank.is_ace());
                let expected = if has_ace && hard + 10 <= 21 {
                    hard + 10
                } else {
                    hard
                };

                assert_eq!(hand.value(), expected, "{ranks:?}");
                assert_eq!(hand.is_soft(), has_ace && hard + 10 <= 21, "{ranks:?}");
            }
        }
    }
}

#[test]
fn multiple_aces_value() {
    let aces = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Ace, Suit::Hearts),
        card(Rank::Ace, Suit::Diamonds),
        card(Rank::Ace, Suit::Clubs),
    ];
    let hand = hand_of(&aces, 10);
    assert_eq!(hand.value(), 14);
    assert!(hand.is_soft());

    let hand = hand_of(&aces[..2], 10);
    assert_eq!(hand.value(), 12);
    assert!(!hand.is_natural());
}

#[test]
fn fresh_shoe_holds_each_card_once() {
    let mut shoes = SeededShoes::new(7);

    for _ in 0..20 {
        let mut shoe = shoes.next_shoe();
        assert_eq!(shoe.remaining(), DECK_SIZE);

        let mut seen = HashSet::new();
        for _ in 0..DECK_SIZE {
            assert!(seen.insert(shoe.draw().unwrap()));
        }
        assert_eq!(seen.len(), DECK_SIZE);
        assert_eq!(shoe.draw(), Err(ShoeError::Exhausted));
    }
}

#[test]
fn same_seed_gives_same_shuffle() {
    let first = SeededShoes::new(42).next_shoe();
    let second = SeededShoes::new(42).next_shoe();
    assert_eq!(first, second);

    let mut shoes = SeededShoes::new(42);
    let _ = shoes.next_shoe();
    assert_ne!(shoes.next_shoe(), first);
}

#[test]
fn entropy_sources_deal_different_shoes() {
    let first = SeededShoes::from_entropy().next_shoe();
    let second = SeededShoes::from_entropy().next_shoe();
    assert_eq!(first.remaining(), DECK_SIZE);
    assert_ne!(first, second);
}

#[test]
fn restored_shoe_is_checked() {
    let mut shoe = SeededShoes::new(5).next_shoe();
    shoe.draw().unwrap();
    let json = serde_json::to_value(&shoe).unwrap();
    assert_eq!(serde_json::from_value::<Shoe>(json.clone()).unwrap(), shoe);

    let mut past_end = json.clone();
    past_end["cursor"] = 99.into();
    let err = serde_json::from_value::<Shoe>(past_end).unwrap_err();
    assert!(err.to_string().contains("cursor 99"));

    let mut at_end = json.clone();
    at_end["cursor"] = DECK_SIZE.into();
    let restored = serde_json::from_value::<Shoe>(at_end).unwrap();
    assert_eq!(restored.remaining(), 0);

    let mut repeated = json;
    repeated["cards"][1] = repeated["cards"][0].clone();
    let err = serde_json::from_value::<Shoe>(repeated).unwrap_err();
    assert!(err.to_string().contains("appears twice"));
}

#[test]
fn stacked_shoe_rejects_duplicates() {
    let ace = card(Rank::Ace, Suit::Spades);
    assert_eq!(
        Shoe::stacked(vec![ace, card(Rank::Two, Suit::Clubs), ace]),
        Err(ShoeError::DuplicateCard(ace))
    );
    assert_eq!(
        Shoe::seeded_with_top(1, &[ace, ace]),
        Err(ShoeError::DuplicateCard(ace))
    );
}

#[test]
fn seeded_shoe_starts_with_top_cards() {
    let top = [
        card(Rank::Ten, Suit::Clubs),
        card(Rank::Six, Suit::Spades),
    ];
    let mut shoe = Shoe::seeded_with_top(3, &top).unwrap();
    assert_eq!(shoe.remaining(), DECK_SIZE);
    assert_eq!(shoe.draw().unwrap(), top[0]);
    assert_eq!(shoe.draw().unwrap(), top[1]);

    let mut rest = HashSet::new();
    while let Ok(next) = shoe.draw() {
        assert!(!top.contains(&next));
        assert!(rest.insert(next));
    }
    assert_eq!(rest.len(), DECK_SIZE - 2);
}

#[test]
fn dealer_draws_to_seventeen_and_stops() {
    let mut dealer = dealer_of(&[card(Rank::Ten, Suit::Spades), card(Rank::Six, Suit::Hearts)]);
    let mut shoe = stacked(&[card(Rank::Five, Suit::Clubs), card(Rank::Two, Suit::Clubs)]);
    let drawn = play_dealer(&mut dealer, &mut shoe).unwrap();
    assert_eq!(drawn, vec![card(Rank::Five, Suit::Clubs)]);
    assert_eq!(dealer.value(), 21);

    let mut dealer = dealer_of(&[card(Rank::Ten, Suit::Spades), card(Rank::Seven, Suit::Hearts)]);
    let mut shoe = stacked(&[card(Rank::Two, Suit::Clubs)]);
    assert!(play_dealer(&mut dealer, &mut shoe).unwrap().is_empty());
    assert_eq!(shoe.remaining(), 1);

    // Soft 17 stands.
    let mut dealer = dealer_of(&[card(Rank::Ace, Suit::Spades), card(Rank::Six, Suit::Hearts)]);
    let mut shoe = stacked(&[card(Rank::Two, Suit::Clubs)]);
    assert!(play_dealer(&mut dealer, &mut shoe).unwrap().is_empty());
}

#[test]
fn dealer_never_stops_below_seventeen() {
    let mut shoes = SeededShoes::new(99);

    for _ in 0..500 {
        let mut shoe = shoes.next_shoe();
        let mut dealer = DealerHand::new();
        dealer.add_card(shoe.draw().unwrap());
        dealer.add_card(shoe.draw().unwrap());
        let opening = dealer.value();

        let drawn = play_dealer(&mut dealer, &mut shoe).unwrap();
        assert!(dealer.value() >= DEALER_STANDS_ON);

        if opening >= DEALER_STANDS_ON {
            assert!(drawn.is_empty());
        } else {
            assert!(!drawn.is_empty());
            let before_last = dealer_of(&dealer.cards()[..dealer.len() - 1]);
            assert!(before_last.value() < DEALER_STANDS_ON);
        }
    }
}

#[test]
fn dealer_reports_exhausted_shoe() {
    let mut dealer = dealer_of(&[card(Rank::Two, Suit::Spades), card(Rank::Three, Suit::Hearts)]);
    let mut shoe = stacked(&[card(Rank::Four, Suit::Clubs)]);
    assert_eq!(
        play_dealer(&mut dealer, &mut shoe),
        Err(ShoeError::Exhausted)
    );
}

#[test]
fn payout_rules() {
    let options = GameOptions::default();
    let natural = hand_of(&[card(Rank::Ace, Suit::Spades), card(Rank::King, Suit::Diamonds)], 10);
    let twenty = dealer_of(&[card(Rank::Ten, Suit::Hearts), card(Rank::Queen, Suit::Clubs)]);
    let dealer_natural = dealer_of(&[card(Rank::Ace, Suit::Hearts), card(Rank::Jack, Suit::Clubs)]);
    let dealer_bust = dealer_of(&[
        card(Rank::Ten, Suit::Hearts),
        card(Rank::Six, Suit::Clubs),
        card(Rank::Nine, Suit::Clubs),
    ]);

    let result = settle_hand(&natural, &twenty, &options);
    assert_eq!(result.outcome, HandOutcome::Blackjack);
    assert_eq!(result.payout, 15);

    let result = settle_hand(&natural, &dealer_natural, &options);
    assert_eq!(result.outcome, HandOutcome::Push);
    assert_eq!(result.payout, 0);
    assert_eq!(result.returned(), 10);

    let bust = hand_of(
        &[
            card(Rank::Ten, Suit::Spades),
            card(Rank::Eight, Suit::Spades),
            card(Rank::Five, Suit::Spades),
        ],
        10,
    );
    let result = settle_hand(&bust, &dealer_bust, &options);
    assert_eq!(result.outcome, HandOutcome::Lose);
    assert_eq!(result.payout, -10);
    assert_eq!(result.returned(), 0);

    let eighteen = hand_of(&[card(Rank::Ten, Suit::Spades), card(Rank::Eight, Suit::Spades)], 10);
    assert_eq!(settle_hand(&eighteen, &dealer_bust, &options).payout, 10);
    assert_eq!(settle_hand(&eighteen, &twenty, &options).payout, -10);

    let twenty_player = hand_of(&[card(Rank::King, Suit::Spades), card(Rank::Queen, Suit::Spades)], 10);
    let result = settle_hand(&twenty_player, &twenty, &options);
    assert_eq!(result.outcome, HandOutcome::Push);
    assert_eq!(result.payout, 0);
}

#[test]
fn odd_bets_are_refused_unless_rounding_is_configured() {
    // Player A♠ K♦, dealer 10♥ Q♣.
    let cards = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Ten, Suit::Hearts),
        card(Rank::King, Suit::Diamonds),
        card(Rank::Queen, Suit::Clubs),
    ];

    let exact = GameOptions::default();
    let mut bankroll = 100;
    assert_eq!(
        GameSession::deal(GameId(1), PlayerId(1), 5, stacked(&cards), &mut bankroll, &exact, 0)
            .unwrap_err(),
        DealError::InexactPayout
    );
    assert_eq!(bankroll, 100);

    // Every even bet pays exactly one and a half times.
    for bet in (2..=40).step_by(2) {
        let mut bankroll = 100;
        let game = deal(&cards, bet, &mut bankroll, &exact);
        let net = game.settlement().unwrap().net_payout();
        assert_eq!(net * 2, i64::try_from(bet * 3).unwrap());
        assert_eq!(bankroll, 100 + bet * 3 / 2);
    }

    let down = GameOptions::default().with_rounding_blackjack(Some(RoundingMode::Down));
    let mut bankroll = 100;
    let game = deal(&cards, 5, &mut bankroll, &down);
    assert_eq!(game.settlement().unwrap().net_payout(), 7);

    let up = GameOptions::default().with_rounding_blackjack(Some(RoundingMode::Up));
    let mut bankroll = 100;
    let game = deal(&cards, 5, &mut bankroll, &up);
    assert_eq!(game.settlement().unwrap().net_payout(), 8);
    assert_eq!(bankroll, 113);

    let six_to_five = GameOptions::default().with_blackjack_pays(PayoutRatio::SIX_TO_FIVE);
    let mut bankroll = 100;
    assert_eq!(
        GameSession::deal(GameId(1), PlayerId(1), 7, stacked(&cards), &mut bankroll, &six_to_five, 0)
            .unwrap_err(),
        DealError::InexactPayout
    );
    let game = deal(&cards, 25, &mut bankroll, &six_to_five);
    assert_eq!(game.settlement().unwrap().net_payout(), 30);
}

#[test]
fn natural_against_non_natural_pays_three_to_two() {
    // Player A♠ K♦, dealer A♥ 9♣.
    let cards = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Ace, Suit::Hearts),
        card(Rank::King, Suit::Diamonds),
        card(Rank::Nine, Suit::Clubs),
        card(Rank::Five, Suit::Clubs),
    ];
    let mut bankroll = 100;
    let game = deal(&cards, 20, &mut bankroll, &GameOptions::default());

    assert!(!game.is_active());
    let settlement = game.settlement().unwrap();
    let PerHand::Single(result) = settlement else {
        panic!("unexpected split settlement");
    };
    assert_eq!(result.outcome, HandOutcome::Blackjack);
    assert_eq!(result.payout, 30);
    assert_eq!(settlement.net_payout(), 30);
    assert_eq!(bankroll, 130);

    // The dealer only reveals.
    assert_eq!(game.dealer().len(), 2);
    assert!(game.dealer().is_hole_revealed());
    assert_eq!(game.shoe().remaining(), 1);
}

#[test]
fn two_naturals_push() {
    let cards = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Ace, Suit::Hearts),
        card(Rank::King, Suit::Diamonds),
        card(Rank::King, Suit::Clubs),
    ];
    let mut bankroll = 100;
    let game = deal(&cards, 20, &mut bankroll, &GameOptions::default());

    assert!(!game.is_active());
    assert_eq!(game.settlement().unwrap().net_payout(), 0);
    assert_eq!(bankroll, 100);
}

#[test]
fn deal_validates_bet_and_shoe() {
    let options = GameOptions::default();
    let cards = [
        card(Rank::Two, Suit::Spades),
        card(Rank::Three, Suit::Spades),
        card(Rank::Four, Suit::Spades),
        card(Rank::Five, Suit::Spades),
    ];
    let deal_with = |bet: u64, bankroll: &mut u64, cards: &[Card]| {
        GameSession::deal(GameId(1), PlayerId(1), bet, stacked(cards), bankroll, &options, 0)
    };

    let mut bankroll = 50;
    assert_eq!(
        deal_with(0, &mut bankroll, &cards).unwrap_err(),
        DealError::ZeroBet
    );
    assert_eq!(
        deal_with(52, &mut bankroll, &cards).unwrap_err(),
        DealError::InsufficientFunds
    );
    assert_eq!(
        deal_with(10, &mut bankroll, &cards[..3]).unwrap_err(),
        DealError::NotEnoughCards
    );
    assert_eq!(bankroll, 50);

    let game = deal_with(50, &mut bankroll, &cards).unwrap();
    assert_eq!(bankroll, 0);
    assert_eq!(game.committed(), 50);
    assert_eq!(game.current_hand_index(), Some(0));
    assert_eq!(game.hands().get(0).unwrap().cards(), &[cards[0], cards[2]]);
    assert_eq!(game.dealer().cards(), &[cards[1], cards[3]]);
}

#[test]
fn bust_loses_without_dealer_play() {
    let cards = [
        card(Rank::Ten, Suit::Spades),
        card(Rank::Five, Suit::Hearts),
        card(Rank::Six, Suit::Diamonds),
        card(Rank::Nine, Suit::Clubs),
        card(Rank::King, Suit::Hearts),
        card(Rank::Two, Suit::Hearts),
    ];
    let options = GameOptions::default();
    let mut bankroll = 100;
    let mut game = deal(&cards, 10, &mut bankroll, &options);

    let drawn = game.hit(&mut bankroll, &options).unwrap();
    assert_eq!(drawn, card(Rank::King, Suit::Hearts));
    assert!(!game.is_active());
    assert_eq!(game.hands().get(0).unwrap().status(), HandStatus::Bust);
    assert_eq!(game.dealer().len(), 2);
    assert_eq!(game.settlement().unwrap().net_payout(), -10);
    assert_eq!(bankroll, 90);

    assert_eq!(
        game.hit(&mut bankroll, &options),
        Err(ActionError::GameNotActive)
    );
    assert_eq!(
        game.stand(&mut bankroll, &options),
        Err(ActionError::GameNotActive)
    );
}

#[test]
fn stand_plays_dealer_out() {
    // Player 10♠ 9♦ (19), dealer 6♠ 8♥ (14) draws 5♣ to 19.
    let cards = [
        card(Rank::Ten, Suit::Spades),
        card(Rank::Six, Suit::Spades),
        card(Rank::Nine, Suit::Diamonds),
        card(Rank::Eight, Suit::Hearts),
        card(Rank::Five, Suit::Clubs),
    ];
    let options = GameOptions::default();
    let mut bankroll = 100;
    let mut game = deal(&cards, 10, &mut bankroll, &options);

    game.stand(&mut bankroll, &options).unwrap();
    assert_eq!(game.dealer().value(), 19);
    let PerHand::Single(result) = game.settlement().unwrap() else {
        panic!("unexpected split settlement");
    };
    assert_eq!(result.outcome, HandOutcome::Push);
    assert_eq!(bankroll, 100);
}

#[test]
fn double_down_takes_one_card_and_doubles_the_bet() {
    let cards = [
        card(Rank::Five, Suit::Spades),
        card(Rank::Ten, Suit::Hearts),
        card(Rank::Six, Suit::Diamonds),
        card(Rank::Seven, Suit::Clubs),
        card(Rank::Ten, Suit::Diamonds),
    ];
    let options = GameOptions::default();
    let mut bankroll = 100;
    let mut game = deal(&cards, 10, &mut bankroll, &options);
    assert!(game.can_double_down());

    let drawn = game.double_down(&mut bankroll, &options).unwrap();
    assert_eq!(drawn, card(Rank::Ten, Suit::Diamonds));

    let hand = game.hands().get(0).unwrap();
    assert_eq!(hand.status(), HandStatus::Doubled);
    assert_eq!(hand.bet(), 20);
    assert_eq!(hand.len(), 3);
    assert_eq!(game.committed(), 20);
    assert_eq!(game.settlement().unwrap().net_payout(), 20);
    assert_eq!(bankroll, 120);
}

#[test]
fn double_down_only_on_first_decision() {
    let cards = [
        card(Rank::Two, Suit::Spades),
        card(Rank::Ten, Suit::Hearts),
        card(Rank::Three, Suit::Diamonds),
        card(Rank::Seven, Suit::Clubs),
        card(Rank::Four, Suit::Spades),
    ];
    let options = GameOptions::default();
    let mut bankroll = 100;
    let mut game = deal(&cards, 10, &mut bankroll, &options);

    game.hit(&mut bankroll, &options).unwrap();
    assert!(!game.can_double_down());
    assert_eq!(
        game.double_down(&mut bankroll, &options),
        Err(ActionError::InvalidAction(InvalidAction::CannotDouble))
    );
    assert_eq!(bankroll, 90);
    assert_eq!(game.committed(), 10);
}

#[test]
fn double_down_needs_balance() {
    let cards = [
        card(Rank::Five, Suit::Spades),
        card(Rank::Ten, Suit::Hearts),
        card(Rank::Six, Suit::Diamonds),
        card(Rank::Seven, Suit::Clubs),
        card(Rank::Ten, Suit::Diamonds),
    ];
    let options = GameOptions::default();
    let mut bankroll = 15;
    let mut game = deal(&cards, 10, &mut bankroll, &options);
    let before = game.clone();

    assert_eq!(
        game.double_down(&mut bankroll, &options),
        Err(ActionError::InsufficientBalance)
    );
    assert_eq!(game, before);
    assert_eq!(bankroll, 5);
}

#[test]
fn split_pair_plays_two_hands() {
    // Player 8♣ 8♦, dealer 10♠ 7♥; split draws 3♥ and 2♣.
    let cards = [
        card(Rank::Eight, Suit::Clubs),
        card(Rank::Ten, Suit::Spades),
        card(Rank::Eight, Suit::Diamonds),
        card(Rank::Seven, Suit::Hearts),
        card(Rank::Three, Suit::Hearts),
        card(Rank::Two, Suit::Clubs),
        card(Rank::Ten, Suit::Diamonds),
        card(Rank::Nine, Suit::Spades),
        card(Rank::Four, Suit::Spades),
    ];
    let options = GameOptions::default();
    let mut bankroll = 100;
    let mut game = deal(&cards, 10, &mut bankroll, &options);
    assert!(game.can_split());

    let drawn = game.split(&mut bankroll, &options).unwrap();
    assert_eq!(
        drawn,
        [card(Rank::Three, Suit::Hearts), card(Rank::Two, Suit::Clubs)]
    );
    assert_eq!(bankroll, 80);
    assert_eq!(game.committed(), 20);
    assert!(game.hands().is_split());
    assert_eq!(game.current_hand_index(), Some(0));
    assert!(!game.can_double_down());
    assert!(!game.can_split());

    let PerHand::Split([first, second]) = game.hands() else {
        panic!("hands were not split");
    };
    assert_eq!(first.cards(), &[cards[0], cards[4]]);
    assert_eq!(second.cards(), &[cards[2], cards[5]]);
    assert_eq!((first.bet(), second.bet()), (10, 10));

    // First hand: 11 + 10 = 21, then stand.
    game.hit(&mut bankroll, &options).unwrap();
    game.stand(&mut bankroll, &options).unwrap();
    assert_eq!(game.current_hand_index(), Some(1));

    // Second hand: 10 + 9 = 19, then stand.
    game.hit(&mut bankroll, &options).unwrap();
    game.stand(&mut bankroll, &options).unwrap();
    assert!(!game.is_active());

    let settlement = game.settlement().unwrap();
    let PerHand::Split([left, right]) = settlement else {
        panic!("expected a split settlement");
    };
    assert_eq!(left.outcome, HandOutcome::Win);
    assert_eq!(right.outcome, HandOutcome::Win);
    assert_eq!(settlement.net_payout(), left.payout + right.payout);
    assert_eq!(settlement.net_payout(), 20);
    assert_eq!(bankroll, 120);
}

#[test]
fn split_rules() {
    let options = GameOptions::default();

    // Ten and king are not a pair.
    let mut bankroll = 100;
    let mut game = deal(
        &[
            card(Rank::Ten, Suit::Spades),
            card(Rank::Nine, Suit::Hearts),
            card(Rank::King, Suit::Diamonds),
            card(Rank::Seven, Suit::Clubs),
            card(Rank::Two, Suit::Clubs),
            card(Rank::Three, Suit::Clubs),
        ],
        10,
        &mut bankroll,
        &options,
    );
    assert!(!game.can_split());
    assert_eq!(
        game.split(&mut bankroll, &options),
        Err(ActionError::InvalidAction(InvalidAction::CannotSplit))
    );

    // One split only, and no doubling on split hands.
    let mut bankroll = 100;
    let mut game = deal(
        &[
            card(Rank::Eight, Suit::Clubs),
            card(Rank::Ten, Suit::Spades),
            card(Rank::Eight, Suit::Diamonds),
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Eight, Suit::Hearts),
            card(Rank::Three, Suit::Clubs),
        ],
        10,
        &mut bankroll,
        &options,
    );
    game.split(&mut bankroll, &options).unwrap();
    assert_eq!(
        game.split(&mut bankroll, &options),
        Err(ActionError::InvalidAction(InvalidAction::AlreadySplit))
    );
    assert_eq!(
        game.double_down(&mut bankroll, &options),
        Err(ActionError::InvalidAction(InvalidAction::CannotDouble))
    );
    assert_eq!(bankroll, 80);

    // The second bet must be covered.
    let mut bankroll = 10;
    let mut game = deal(
        &[
            card(Rank::Eight, Suit::Clubs),
            card(Rank::Ten, Suit::Spades),
            card(Rank::Eight, Suit::Diamonds),
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Two, Suit::Clubs),
            card(Rank::Three, Suit::Clubs),
        ],
        10,
        &mut bankroll,
        &options,
    );
    assert_eq!(
        game.split(&mut bankroll, &options),
        Err(ActionError::InsufficientBalance)
    );
    assert!(!game.hands().is_split());
}

#[test]
fn split_aces_take_one_card_and_never_count_as_naturals() {
    // Player A♠ A♦, dealer 10♠ 7♥; split draws K♣ and 5♦.
    let cards = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Ten, Suit::Spades),
        card(Rank::Ace, Suit::Diamonds),
        card(Rank::Seven, Suit::Hearts),
        card(Rank::King, Suit::Clubs),
        card(Rank::Five, Suit::Diamonds),
    ];
    let options = GameOptions::default();
    let mut bankroll = 100;
    let mut game = deal(&cards, 10, &mut bankroll, &options);

    game.split(&mut bankroll, &options).unwrap();
    assert!(!game.is_active());

    let PerHand::Split([twenty_one, sixteen]) = game.settlement().unwrap() else {
        panic!("expected a split settlement");
    };
    assert_eq!(twenty_one.outcome, HandOutcome::Win);
    assert_eq!(twenty_one.payout, 10);
    assert_eq!(sixteen.outcome, HandOutcome::Lose);
    assert_eq!(bankroll, 100);

    let options = GameOptions::default().with_split_aces_receive_one_card(false);
    let mut bankroll = 100;
    let mut game = deal(&cards, 10, &mut bankroll, &options);
    game.split(&mut bankroll, &options).unwrap();
    assert!(game.is_active());
    assert_eq!(game.current_hand_index(), Some(0));
    assert_eq!(game.hands().get(0).unwrap().status(), HandStatus::Active);
    assert!(!game.hands().get(0).unwrap().is_natural());
}

#[test]
fn exhausted_shoe_leaves_game_untouched() {
    let cards = [
        card(Rank::Ten, Suit::Spades),
        card(Rank::Five, Suit::Hearts),
        card(Rank::Two, Suit::Diamonds),
        card(Rank::Nine, Suit::Clubs),
    ];
    let options = GameOptions::default();
    let mut bankroll = 100;
    let mut game = deal(&cards, 10, &mut bankroll, &options);
    let before = game.clone();

    assert_eq!(
        game.hit(&mut bankroll, &options),
        Err(ActionError::ShoeExhausted)
    );
    assert_eq!(game, before);
    assert_eq!(bankroll, 90);
}

#[test]
fn abandon_stands_every_hand() {
    let cards = [
        card(Rank::Ten, Suit::Spades),
        card(Rank::Ten, Suit::Hearts),
        card(Rank::Nine, Suit::Diamonds),
        card(Rank::Eight, Suit::Clubs),
    ];
    let options = GameOptions::default();
    let mut bankroll = 100;
    let mut game = deal(&cards, 10, &mut bankroll, &options);

    game.abandon(&mut bankroll, &options).unwrap();
    assert!(!game.is_active());
    assert_eq!(game.hands().get(0).unwrap().status(), HandStatus::Stood);
    assert_eq!(game.settlement().unwrap().net_payout(), 10);
    assert_eq!(bankroll, 110);
    assert_eq!(
        game.abandon(&mut bankroll, &options),
        Err(ActionError::GameNotActive)
    );
}

#[test]
fn dealt_cards_list_every_card_in_order() {
    let cards = [
        card(Rank::Ten, Suit::Spades),
        card(Rank::Six, Suit::Spades),
        card(Rank::Nine, Suit::Diamonds),
        card(Rank::Eight, Suit::Hearts),
        card(Rank::Five, Suit::Clubs),
    ];
    let options = GameOptions::default();
    let mut bankroll = 100;
    let mut game = deal(&cards, 10, &mut bankroll, &options);
    game.stand(&mut bankroll, &options).unwrap();

    let rows = game.dealt_cards();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].card, cards[0]);
    assert_eq!(rows[1].card, cards[2]);
    assert_eq!((rows[1].hand_index, rows[1].order), (0, 1));
    assert_eq!(rows[4].card, cards[4]);
    assert_eq!(rows[4].order, 2);
}
