use std::collections::HashSet;
use std::sync::mpsc::Receiver;

use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::{Action, PlayerId};
use crate::card::{
    Card, Colour, Face, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS, full_deck, shuffle_backs,
};
use crate::deck::Deck;
use crate::error::{GameError, InvalidAction};
use crate::event::{EventBus, EventKind, GameEvent, SubscriptionId};
use crate::player::Player;
use crate::score::{MATCH_TARGET, round_points};
use crate::state::{Direction, GameSettings, GameStateView, PlayerSummary, TurnPhase};

const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub seed: u64,
    pub hand_size: usize,
    pub match_target: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            hand_size: HAND_SIZE,
            match_target: MATCH_TARGET,
        }
    }
}

/// Builder that enables deterministic deck injection for testing.
#[derive(Default)]
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Use `deck` as the draw sequence, front first. It is not shuffled
    /// before the first deal.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Override the number of cards dealt to each player (standard rules: 7).
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = hand_size;
        self
    }

    /// Override the score that wins the match (standard rules: 500).
    pub fn with_match_target(mut self, match_target: u32) -> Self {
        self.config.match_target = match_target;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }

    /// Builds the game and deals the first round to `names`.
    pub fn start<S: AsRef<str>>(self, names: &[S]) -> Result<Game, GameError> {
        let mut game = self.build()?;
        game.initialize_game(names)?;
        Ok(game)
    }
}

/// Rules engine for one table.
///
/// Every command either commits completely or returns an error and leaves
/// the game exactly as it was.
pub struct Game {
    config: GameConfig,
    deck: Deck,
    deck_size: usize,
    players: Vec<Player>,
    current_player: PlayerId,
    direction: Direction,
    forced_colour: Option<Colour>,
    pending_advance_steps: usize,
    phase: TurnPhase,
    round_winner: Option<PlayerId>,
    match_winner: Option<PlayerId>,
    last_round_points: u32,
    events: EventBus,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        if config.hand_size == 0 {
            return Err(GameError::InvalidConfiguration("hand size must be positive"));
        }
        if config.match_target == 0 {
            return Err(GameError::InvalidConfiguration("match target must be positive"));
        }
        let mut rng = StdRng::seed_from_u64(config.seed);
        let deck = match deck {
            Some(cards) => {
                if cards.is_empty() {
                    return Err(GameError::InvalidConfiguration("deck must not be empty"));
                }
                Deck::new(cards, rng)
            }
            None => {
                let mut cards = full_deck();
                shuffle_backs(&mut cards, &mut rng);
                let mut deck = Deck::new(cards, rng);
                deck.shuffle();
                deck
            }
        };
        let deck_size = deck.draw_count();

        Ok(Game {
            config,
            deck,
            deck_size,
            players: Vec::new(),
            current_player: 0,
            direction: Direction::Clockwise,
            forced_colour: None,
            pending_advance_steps: 1,
            phase: TurnPhase::Setup,
            round_winner: None,
            match_winner: None,
            last_round_points: 0,
            events: EventBus::default(),
        })
    }

    // ---- commands ----

    /// Seats `names` in turn order, deals a hand to each and turns up a
    /// number card to start the discard pile. Calling it again starts a new
    /// match: every card is gathered back and reshuffled first.
    pub fn initialize_game<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&names.len()) {
            return Err(GameError::InvalidPlayers("between 2 and 4 players are required"));
        }
        let mut seen = HashSet::with_capacity(names.len());
        let mut players = Vec::with_capacity(names.len());
        for name in names {
            let player = Player::new(name.as_ref())?;
            if !seen.insert(player.name().to_owned()) {
                return Err(GameError::InvalidPlayers("player names must be distinct"));
            }
            players.push(player);
        }

        let mut deck = self.deck.clone();
        if self.phase != TurnPhase::Setup {
            let held: Vec<Card> = self
                .players
                .iter()
                .flat_map(|player| player.hand().iter().copied())
                .collect();
            deck.reclaim(held);
        }
        self.deal_round(&mut deck, &mut players)?;

        self.deck = deck;
        self.players = players;
        self.reset_round_state();
        self.match_winner = None;
        self.last_round_points = 0;
        debug!(
            "game initialized with {} players, top card {}",
            self.players.len(),
            self.describe_top()
        );
        self.publish(EventKind::GameInitialized);
        Ok(())
    }

    /// Plays the card at `hand_index` (zero-based) from the current
    /// player's hand and returns it. `colour` is the colour nominated for a
    /// wild card and is ignored for every other card.
    pub fn play_card(
        &mut self,
        hand_index: usize,
        colour: Option<Colour>,
    ) -> Result<Card, GameError> {
        self.ensure_awaiting_action()?;
        let current = self.current_player;
        let hand_len = self.players[current].hand_len();
        let card = *self.players[current]
            .hand()
            .get(hand_index)
            .ok_or(InvalidAction::HandIndex(hand_index))?;
        self.check_legal(&card, colour)?;
        if hand_len > 1 && !self.supply_covers(&card) {
            return Err(GameError::SupplyExhausted);
        }

        let card = self.players[current].remove_card(hand_index)?;
        self.deck.discard(card);
        self.forced_colour = if card.is_wild() { colour } else { None };
        debug!("{} played {card}", self.players[current].name());

        if self.players[current].hand().is_empty() {
            self.finish_round(current);
            let kind = if self.phase == TurnPhase::MatchOver {
                EventKind::MatchEnded
            } else {
                EventKind::RoundEnded
            };
            self.publish(kind);
            return Ok(card);
        }

        self.resolve_effect(&card)?;
        self.phase = TurnPhase::ActionTaken;
        self.publish(EventKind::CardPlayed);
        Ok(card)
    }

    /// Current player draws one card instead of playing.
    pub fn draw_card(&mut self) -> Result<Card, GameError> {
        self.ensure_awaiting_action()?;
        if self.deck.available() == 0 {
            return Err(GameError::SupplyExhausted);
        }
        let card = self.deck.draw()?;
        let current = self.current_player;
        self.players[current].add_card(card);
        self.pending_advance_steps = 1;
        self.phase = TurnPhase::ActionTaken;
        debug!("{} drew a card", self.players[current].name());
        self.publish(EventKind::CardDrawn);
        Ok(card)
    }

    /// Moves the turn on by the steps the last play or draw left pending
    /// and returns the new current player.
    pub fn advance_to_next_player(&mut self) -> Result<PlayerId, GameError> {
        match self.phase {
            TurnPhase::ActionTaken => {}
            TurnPhase::AwaitingAction => return Err(GameError::ActionRequired),
            TurnPhase::RoundOver => return Err(GameError::RoundOver),
            TurnPhase::MatchOver => return Err(GameError::GameOver),
            TurnPhase::Setup => return Err(GameError::NotInitialized),
        }
        let from = self.current_player;
        let steps = self.pending_advance_steps;
        self.current_player = self.direction.step(from, steps, self.players.len());
        debug!(
            "turn passes from {} to {} ({} step(s) {:?})",
            self.players[from].name(),
            self.players[self.current_player].name(),
            steps,
            self.direction
        );
        self.pending_advance_steps = 1;
        self.phase = TurnPhase::AwaitingAction;
        self.publish(EventKind::TurnAdvanced);
        Ok(self.current_player)
    }

    /// Gathers every card, reshuffles and deals the next round to the same
    /// players. Scores carry over.
    pub fn start_new_round(&mut self) -> Result<(), GameError> {
        match self.phase {
            TurnPhase::RoundOver => {}
            TurnPhase::MatchOver => return Err(GameError::GameOver),
            TurnPhase::Setup => return Err(GameError::NotInitialized),
            TurnPhase::AwaitingAction | TurnPhase::ActionTaken => {
                return Err(GameError::RoundInProgress);
            }
        }
        let mut deck = self.deck.clone();
        let mut players = self.players.clone();
        let held: Vec<Card> = players
            .iter_mut()
            .flat_map(|player| player.take_hand())
            .collect();
        deck.reclaim(held);
        self.deal_round(&mut deck, &mut players)?;

        self.deck = deck;
        self.players = players;
        self.reset_round_state();
        debug!("new round started, top card {}", self.describe_top());
        self.publish(EventKind::RoundStarted);
        Ok(())
    }

    pub fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        match action {
            Action::Play { hand_index, colour } => self.play_card(hand_index, colour).map(|_| ()),
            Action::Draw => self.draw_card().map(|_| ()),
            Action::EndTurn => self.advance_to_next_player().map(|_| ()),
        }
    }

    pub fn subscribe(&mut self) -> (SubscriptionId, Receiver<GameEvent>) {
        self.events.subscribe()
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ---- queries ----

    /// Whether `card` could be played right now with `colour` nominated.
    pub fn is_legal(&self, card: &Card, colour: Option<Colour>) -> bool {
        self.check_legal(card, colour).is_ok()
    }

    /// Every action the current player may take.
    pub fn legal_actions(&self) -> Vec<Action> {
        match self.phase {
            TurnPhase::AwaitingAction => {}
            TurnPhase::ActionTaken => return vec![Action::EndTurn],
            _ => return Vec::new(),
        }
        let hand = self.players[self.current_player].hand();
        let mut actions = Vec::new();
        for (hand_index, card) in hand.iter().enumerate() {
            if hand.len() > 1 && !self.supply_covers(card) {
                continue;
            }
            if card.is_wild() {
                for colour in Colour::ALL {
                    actions.push(Action::Play {
                        hand_index,
                        colour: Some(colour),
                    });
                }
            } else if self.is_legal(card, None) {
                actions.push(Action::Play {
                    hand_index,
                    colour: None,
                });
            }
        }
        if self.deck.available() > 0 {
            actions.push(Action::Draw);
        }
        actions
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn settings(&self) -> GameSettings {
        GameSettings {
            num_players: self.players.len(),
            hand_size: self.config.hand_size,
            match_target: self.config.match_target,
            deck_size: self.deck_size,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(id).ok_or(GameError::InvalidPlayer(id))
    }

    /// Player whose turn it is; `None` before the game is initialized.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    pub fn current_player_id(&self) -> PlayerId {
        self.current_player
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.deck.top()
    }

    pub fn forced_colour(&self) -> Option<Colour> {
        self.forced_colour
    }

    /// Forced colour if one is active, otherwise the colour of the top card.
    pub fn active_colour(&self) -> Option<Colour> {
        self.forced_colour
            .or_else(|| self.deck.top().and_then(Card::colour))
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_advance_steps(&self) -> usize {
        self.pending_advance_steps
    }

    pub fn is_round_over(&self) -> bool {
        matches!(self.phase, TurnPhase::RoundOver | TurnPhase::MatchOver)
    }

    pub fn round_winner(&self) -> Option<&Player> {
        self.round_winner.and_then(|id| self.players.get(id))
    }

    pub fn round_winner_id(&self) -> Option<PlayerId> {
        self.round_winner
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::MatchOver
    }

    pub fn winner(&self) -> Option<&Player> {
        self.match_winner.and_then(|id| self.players.get(id))
    }

    pub fn winner_id(&self) -> Option<PlayerId> {
        self.match_winner
    }

    /// Points awarded to the most recent round winner.
    pub fn last_round_points(&self) -> u32 {
        self.last_round_points
    }

    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    /// Read-only access to the draw and discard piles.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn draw_pile_count(&self) -> usize {
        self.deck.draw_count()
    }

    pub fn discard_pile_count(&self) -> usize {
        self.deck.discard_count()
    }

    /// Cards across the draw pile, discard pile and every hand. Always
    /// equals `deck_size()`.
    pub fn card_count(&self) -> usize {
        self.deck.draw_count()
            + self.deck.discard_count()
            + self.players.iter().map(Player::hand_len).sum::<usize>()
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<GameStateView, GameError> {
        let own = self.player(perspective)?;
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| PlayerSummary {
                id: idx,
                name: player.name().to_owned(),
                score: player.score(),
                hand_size: player.hand_len(),
                is_current: idx == self.current_player,
            })
            .collect();

        Ok(GameStateView {
            settings: self.settings(),
            phase: self.phase,
            self_player: perspective,
            current_player: self.current_player,
            direction: self.direction,
            top_card: self.deck.top().copied(),
            forced_colour: self.forced_colour,
            draw_pile_count: self.deck.draw_count(),
            discard_pile_count: self.deck.discard_count(),
            players,
            hand: own.hand().to_vec(),
            round_winner: self.round_winner,
            match_winner: self.match_winner,
            last_round_points: self.last_round_points,
        })
    }

    // ---- internals ----

    fn ensure_awaiting_action(&self) -> Result<(), GameError> {
        match self.phase {
            TurnPhase::AwaitingAction => Ok(()),
            TurnPhase::ActionTaken => Err(GameError::ActionAlreadyTaken),
            TurnPhase::RoundOver => Err(GameError::RoundOver),
            TurnPhase::MatchOver => Err(GameError::GameOver),
            TurnPhase::Setup => Err(GameError::NotInitialized),
        }
    }

    /// Wilds need a nominated colour. Anything else must match the active
    /// colour, the top card's rank (numbers) or the top card's kind
    /// (actions).
    fn check_legal(&self, card: &Card, colour: Option<Colour>) -> Result<(), GameError> {
        if card.is_wild() {
            return match colour {
                Some(_) => Ok(()),
                None => Err(InvalidAction::MissingColour.into()),
            };
        }
        let top = self.deck.top().ok_or(GameError::NotInitialized)?;
        let colour_match = card.colour().is_some() && card.colour() == self.active_colour();
        let rank_match = matches!(
            (card.face.rank(), top.face.rank()),
            (Some(played), Some(showing)) if played == showing
        );
        let action_match = card.face.same_action(&top.face);
        if colour_match || rank_match || action_match {
            Ok(())
        } else {
            Err(InvalidAction::IllegalCard {
                card: card.face,
                top: top.face,
            }
            .into())
        }
    }

    /// Cards the next player would be forced to draw if `card` were played.
    fn penalty(card: &Card) -> usize {
        match card.face {
            Face::DrawOne(_) => 1,
            Face::WildDrawTwo => 2,
            _ => 0,
        }
    }

    /// Once `card` is discarded, everything but it can be drawn again.
    fn supply_covers(&self, card: &Card) -> bool {
        Self::penalty(card) <= self.deck.draw_count() + self.deck.discard_count()
    }

    fn resolve_effect(&mut self, card: &Card) -> Result<(), GameError> {
        self.pending_advance_steps = match card.face {
            Face::Number { .. } | Face::Flip(_) | Face::Wild => 1,
            Face::Skip(_) => 2,
            Face::Reverse(_) => {
                self.direction = self.direction.reversed();
                // Two players: the same player goes again.
                if self.players.len() == 2 { 0 } else { 1 }
            }
            Face::DrawOne(_) | Face::WildDrawTwo => {
                let victim = self
                    .direction
                    .step(self.current_player, 1, self.players.len());
                for _ in 0..Self::penalty(card) {
                    let drawn = self.deck.draw()?;
                    self.players[victim].add_card(drawn);
                }
                debug!(
                    "{} draws {} and loses their turn",
                    self.players[victim].name(),
                    Self::penalty(card)
                );
                2
            }
        };
        Ok(())
    }

    fn finish_round(&mut self, winner: PlayerId) {
        let points = round_points(&self.players, winner);
        self.players[winner].increase_score(points);
        self.last_round_points = points;
        self.round_winner = Some(winner);
        let total = self.players[winner].score();
        if total >= self.config.match_target {
            self.match_winner = Some(winner);
            self.phase = TurnPhase::MatchOver;
            info!(
                "{} wins the match with {total} points",
                self.players[winner].name()
            );
        } else {
            self.phase = TurnPhase::RoundOver;
            info!(
                "{} wins the round for {points} points ({total} total)",
                self.players[winner].name()
            );
        }
    }

    fn deal_round(&self, deck: &mut Deck, players: &mut [Player]) -> Result<(), GameError> {
        let needed = self.config.hand_size * players.len();
        if deck.draw_count() <= needed {
            return Err(GameError::InvalidConfiguration(
                "deck does not contain enough cards to deal hands",
            ));
        }
        for player in players.iter_mut() {
            for _ in 0..self.config.hand_size {
                player.add_card(deck.draw()?);
            }
        }
        Self::reveal_first_discard(deck)
    }

    /// Turns cards onto the discard pile until a number shows.
    fn reveal_first_discard(deck: &mut Deck) -> Result<(), GameError> {
        let is_number = |card: &Card| matches!(card.face, Face::Number { .. });
        loop {
            if !deck.draw_pile().any(is_number) && !deck.discard_pile().iter().any(is_number) {
                return Err(GameError::SupplyExhausted);
            }
            let card = deck.draw()?;
            deck.discard(card);
            if is_number(&card) {
                return Ok(());
            }
            trace!("turned up {card}, drawing again");
        }
    }

    fn reset_round_state(&mut self) {
        self.current_player = 0;
        self.direction = Direction::Clockwise;
        self.forced_colour = None;
        self.pending_advance_steps = 1;
        self.round_winner = None;
        self.phase = TurnPhase::AwaitingAction;
    }

    fn describe_top(&self) -> String {
        self.deck
            .top()
            .map(ToString::to_string)
            .unwrap_or_else(|| String::from("--"))
    }

    fn publish(&mut self, kind: EventKind) {
        if self.events.is_empty() {
            return;
        }
        let event = GameEvent {
            kind,
            round_over: self.is_round_over(),
            game_over: self.is_game_over(),
            current_player: self.current_player,
            top_card: self.deck.top().copied(),
            forced_colour: self.forced_colour,
        };
        self.events.publish(&event);
    }
}
