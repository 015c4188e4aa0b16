//! Game configuration options.

use serde::{Deserialize, Serialize};

/// Rounding mode for natural payouts that do not divide evenly.
///
/// Only consulted when [`GameOptions::rounding_blackjack`] is set; by default
/// such bets are refused instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest, halves up.
    Nearest,
}

/// Blackjack payout expressed as a ratio of the bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayoutRatio {
    /// Numerator.
    pub numerator: u16,
    /// Denominator, never zero.
    pub denominator: u16,
}

impl PayoutRatio {
    /// Pays 3 to 2.
    pub const THREE_TO_TWO: Self = Self {
        numerator: 3,
        denominator: 2,
    };
    /// Pays 6 to 5.
    pub const SIX_TO_FIVE: Self = Self {
        numerator: 6,
        denominator: 5,
    };
    /// Pays even money.
    pub const ONE_TO_ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// Creates a ratio, or `None` when `denominator` is zero.
    #[must_use]
    pub const fn new(numerator: u16, denominator: u16) -> Option<Self> {
        if denominator == 0 {
            None
        } else {
            Some(Self {
                numerator,
                denominator,
            })
        }
    }

    /// Returns whether the ratio pays `bet` in whole units.
    ///
    /// ```
    /// use bjsession::PayoutRatio;
    ///
    /// assert!(PayoutRatio::THREE_TO_TWO.is_exact_for(500));
    /// assert!(!PayoutRatio::THREE_TO_TWO.is_exact_for(5));
    /// ```
    #[must_use]
    pub fn is_exact_for(self, bet: u64) -> bool {
        let scaled = u128::from(bet) * u128::from(self.numerator);
        scaled % u128::from(self.denominator.max(1)) == 0
    }

    /// Applies the ratio to `bet`, rounding the remainder with `mode`.
    ///
    /// ```
    /// use bjsession::{PayoutRatio, RoundingMode};
    ///
    /// assert_eq!(PayoutRatio::THREE_TO_TWO.apply(20, RoundingMode::Down), 30);
    /// assert_eq!(PayoutRatio::THREE_TO_TWO.apply(5, RoundingMode::Down), 7);
    /// assert_eq!(PayoutRatio::THREE_TO_TWO.apply(5, RoundingMode::Up), 8);
    /// ```
    #[must_use]
    pub fn apply(self, bet: u64, mode: RoundingMode) -> u64 {
        let scaled = u128::from(bet) * u128::from(self.numerator);
        let denominator = u128::from(self.denominator.max(1));
        let quotient = scaled / denominator;
        let remainder = scaled % denominator;

        let rounded = match mode {
            RoundingMode::Down => quotient,
            RoundingMode::Up if remainder > 0 => quotient + 1,
            RoundingMode::Up => quotient,
            RoundingMode::Nearest if remainder * 2 >= denominator => quotient + 1,
            RoundingMode::Nearest => quotient,
        };
        u64::try_from(rounded).unwrap_or(u64::MAX)
    }
}

/// Configuration for a blackjack table.
///
/// Every amount (bets, balances, payouts) is a whole number of the currency's
/// minor unit, e.g. cents.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjsession::{GameOptions, PayoutRatio};
///
/// let options = GameOptions::default()
///     .with_blackjack_pays(PayoutRatio::SIX_TO_FIVE)
///     .with_initial_balance(500)
///     .with_max_retries(5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    /// Natural blackjack payout ratio.
    pub blackjack_pays: PayoutRatio,
    /// How to round a natural's payout that is not a whole unit. `None`
    /// refuses such bets at the deal, so every payout is exact.
    pub rounding_blackjack: Option<RoundingMode>,
    /// Whether split aces receive one card each and stand.
    pub split_aces_receive_one_card: bool,
    /// Balance credited when an account is opened.
    pub initial_balance: u64,
    /// How many times an action is re-applied after the account changed underneath it.
    pub max_retries: u8,
    /// Seconds of inactivity after which an active game is reaped. `None` keeps games forever.
    pub abandon_after: Option<u64>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            blackjack_pays: PayoutRatio::THREE_TO_TWO,
            rounding_blackjack: None,
            split_aces_receive_one_card: true,
            initial_balance: 1000,
            max_retries: 3,
            abandon_after: Some(3600),
        }
    }
}

impl GameOptions {
    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsession::{GameOptions, PayoutRatio};
    ///
    /// let options = GameOptions::default().with_blackjack_pays(PayoutRatio::SIX_TO_FIVE);
    /// assert_eq!(options.blackjack_pays, PayoutRatio::SIX_TO_FIVE);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: PayoutRatio) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets how inexact natural payouts are rounded, or `None` to refuse the
    /// bets that would need it.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsession::{GameOptions, PayoutRatio, RoundingMode};
    ///
    /// let options = GameOptions::default()
    ///     .with_blackjack_pays(PayoutRatio::SIX_TO_FIVE)
    ///     .with_rounding_blackjack(Some(RoundingMode::Down));
    /// assert_eq!(options.rounding_blackjack, Some(RoundingMode::Down));
    /// ```
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: Option<RoundingMode>) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets whether split aces receive only one card.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsession::GameOptions;
    ///
    /// let options = GameOptions::default().with_split_aces_receive_one_card(false);
    /// assert!(!options.split_aces_receive_one_card);
    /// ```
    #[must_use]
    pub const fn with_split_aces_receive_one_card(mut self, one_card: bool) -> Self {
        self.split_aces_receive_one_card = one_card;
        self
    }

    /// Sets the balance given to newly opened accounts.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsession::GameOptions;
    ///
    /// let options = GameOptions::default().with_initial_balance(250);
    /// assert_eq!(options.initial_balance, 250);
    /// ```
    #[must_use]
    pub const fn with_initial_balance(mut self, balance: u64) -> Self {
        self.initial_balance = balance;
        self
    }

    /// Sets how many times a conflicting commit is retried.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsession::GameOptions;
    ///
    /// let options = GameOptions::default().with_max_retries(0);
    /// assert_eq!(options.max_retries, 0);
    /// ```
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the inactivity window after which active games are reaped.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsession::GameOptions;
    ///
    /// let options = GameOptions::default().with_abandon_after(None);
    /// assert_eq!(options.abandon_after, None);
    /// ```
    #[must_use]
    pub const fn with_abandon_after(mut self, seconds: Option<u64>) -> Self {
        self.abandon_after = seconds;
        self
    }
}
