//! American roulette wheel with colour bets.

use std::fmt;

use rand::{seq::IndexedRandom, Rng};

use super::Settlement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouletteColour {
    Red,
    Black,
    Green,
}

impl RouletteColour {
    pub fn from_choice(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "red" => Some(RouletteColour::Red),
            "black" => Some(RouletteColour::Black),
            "green" => Some(RouletteColour::Green),
            _ => None,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            RouletteColour::Red => "🔴",
            RouletteColour::Black => "⚫",
            RouletteColour::Green => "🟢",
        }
    }

    /// Winnings multiplier on a correct guess.
    pub fn multiplier(self) -> i64 {
        match self {
            RouletteColour::Green => 15,
            RouletteColour::Red | RouletteColour::Black => 1,
        }
    }
}

impl fmt::Display for RouletteColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouletteColour::Red => "red",
            RouletteColour::Black => "black",
            RouletteColour::Green => "green",
        };
        write!(f, "{}", name)
    }
}

/// Pocket labels: `00` then `0` through `36`.
pub fn pockets() -> Vec<String> {
    std::iter::once("00".to_string())
        .chain((0..=36).map(|n: u8| n.to_string()))
        .collect()
}

/// Colour of a pocket; zeroes are green, even numbers red, odd numbers black.
pub fn pocket_colour(pocket: &str) -> RouletteColour {
    match pocket.parse::<u8>() {
        Ok(0) | Err(_) => RouletteColour::Green,
        Ok(n) if n % 2 == 0 => RouletteColour::Red,
        Ok(_) => RouletteColour::Black,
    }
}

/// Result of one spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouletteSpin {
    pub pocket: String,
    pub colour: RouletteColour,
    pub guess: RouletteColour,
}

impl RouletteSpin {
    /// Resolves a guess against a known pocket.
    pub fn resolve(pocket: impl Into<String>, guess: RouletteColour) -> Self {
        let pocket = pocket.into();
        let colour = pocket_colour(&pocket);
        Self {
            pocket,
            colour,
            guess,
        }
    }

    pub fn spin<R: Rng + ?Sized>(guess: RouletteColour, rng: &mut R) -> Self {
        let pockets = pockets();
        let pocket = pockets
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| "0".to_string());
        Self::resolve(pocket, guess)
    }

    pub fn is_win(&self) -> bool {
        self.colour == self.guess
    }

    pub fn settlement(&self, bet: i64) -> Settlement {
        if self.is_win() {
            Settlement::win(bet * self.guess.multiplier())
        } else {
            Settlement::loss(bet)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    /// Tests the wheel layout.
    ///
    /// Expected: 38 pockets, two green, 18 red, 18 black
    #[test]
    fn wheel_layout() {
        let pockets = pockets();
        assert_eq!(pockets.len(), 38);

        let count = |colour| {
            pockets
                .iter()
                .filter(|p| pocket_colour(p) == colour)
                .count()
        };
        assert_eq!(count(RouletteColour::Green), 2);
        assert_eq!(count(RouletteColour::Red), 18);
        assert_eq!(count(RouletteColour::Black), 18);
        assert_eq!(pocket_colour("00"), RouletteColour::Green);
    }

    /// Tests payouts for fixed pockets.
    ///
    /// Expected: 0 on green pays 15x, 17 on black pays 1x, a miss loses the bet
    #[test]
    fn payouts() {
        assert_eq!(
            RouletteSpin::resolve("0", RouletteColour::Green).settlement(10),
            Settlement::win(150)
        );
        assert_eq!(
            RouletteSpin::resolve("17", RouletteColour::Black).settlement(10),
            Settlement::win(10)
        );
        assert_eq!(
            RouletteSpin::resolve("17", RouletteColour::Red).settlement(10),
            Settlement::loss(10)
        );
    }

    /// Tests colour parsing.
    ///
    /// Expected: case-insensitive names, unknown colours rejected
    #[test]
    fn parses_colour() {
        assert_eq!(RouletteColour::from_choice("Red"), Some(RouletteColour::Red));
        assert_eq!(RouletteColour::from_choice("GREEN"), Some(RouletteColour::Green));
        assert_eq!(RouletteColour::from_choice("blue"), None);
    }

    /// Tests random spins land on the wheel.
    ///
    /// Expected: colour always matches the pocket
    #[test]
    fn spins_land_on_wheel() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let spin = RouletteSpin::spin(RouletteColour::Red, &mut rng);
            assert_eq!(spin.colour, pocket_colour(&spin.pocket));
        }
    }
}
