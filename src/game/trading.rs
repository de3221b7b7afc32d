use crate::game::resources::ResourceBundle;
use crate::game::round::Phase;
use crate::game::state::{GameError, GameState};
use crate::game::trade::{Exchange, TradeId, validate_exchange};

impl GameState {
    pub fn make_trade_offer(
        &mut self,
        player: &str,
        offer: ResourceBundle,
        request: ResourceBundle,
        blocked: &[String],
    ) -> Result<TradeId, GameError> {
        let seat = self.ensure_turn("MakeTradeOffer", player, &[Phase::Regular])?;
        let blocked = blocked
            .iter()
            .map(|id| self.seat_of(id))
            .collect::<Result<Vec<_>, _>>()?;
        let id = self
            .trades
            .open(&self.players, seat, offer, request, &blocked, self.clock)?;
        self.stats.record_trade_started(seat);
        log::debug!("{player} opened trade {id}: {offer} for {request}");
        Ok(id)
    }

    pub fn make_counter_trade_offer(
        &mut self,
        player: &str,
        parent: TradeId,
        offer: ResourceBundle,
        request: ResourceBundle,
    ) -> Result<TradeId, GameError> {
        self.ensure_phase("MakeCounterTradeOffer", &[Phase::Regular])?;
        let seat = self.seat_of(player)?;
        let id = self
            .trades
            .counter(&self.players, seat, parent, offer, request, self.clock)?;
        self.stats.record_trade_started(seat);
        log::debug!("{player} countered {parent} with {id}: {offer} for {request}");
        Ok(id)
    }

    pub fn accept_trade_offer(&mut self, player: &str, trade: TradeId) -> Result<(), GameError> {
        self.ensure_phase("AcceptTradeOffer", &[Phase::Regular])?;
        let seat = self.seat_of(player)?;
        self.trades.accept(&self.players, seat, trade)?;
        log::debug!("{player} accepted trade {trade}");
        Ok(())
    }

    pub fn reject_trade_offer(&mut self, player: &str, trade: TradeId) -> Result<(), GameError> {
        self.ensure_phase("RejectTradeOffer", &[Phase::Regular])?;
        let seat = self.seat_of(player)?;
        self.trades.reject(seat, trade)?;
        log::debug!("{player} rejected trade {trade}");
        Ok(())
    }

    pub fn cancel_trade_offer(&mut self, player: &str, trade: TradeId) -> Result<(), GameError> {
        self.ensure_phase("CancelTradeOffer", &[Phase::Regular])?;
        let seat = self.seat_of(player)?;
        self.trades.cancel(seat, trade)?;
        log::debug!("{player} cancelled trade {trade}");
        Ok(())
    }

    pub fn finalize_trade(
        &mut self,
        player: &str,
        accepter: &str,
        trade: TradeId,
    ) -> Result<(), GameError> {
        let seat = self.ensure_turn("FinalizeTrade", player, &[Phase::Regular])?;
        let other = self.seat_of(accepter)?;
        self.trades.finalize(&mut self.players, seat, other, trade)?;
        if let Some(done) = self.trades.get(trade) {
            self.stats
                .record_exchange(seat, Some(other), &done.offer, &done.request);
        }
        Ok(())
    }

    pub fn make_bank_trade(
        &mut self,
        player: &str,
        given: ResourceBundle,
        requested: ResourceBundle,
    ) -> Result<(), GameError> {
        self.exchange("MakeBankTrade", Exchange::Bank, player, given, requested)
    }

    pub fn make_general_port_trade(
        &mut self,
        player: &str,
        given: ResourceBundle,
        requested: ResourceBundle,
    ) -> Result<(), GameError> {
        self.exchange(
            "MakeGeneralPortTrade",
            Exchange::GeneralPort,
            player,
            given,
            requested,
        )
    }

    pub fn make_resource_port_trade(
        &mut self,
        player: &str,
        given: ResourceBundle,
        requested: ResourceBundle,
    ) -> Result<(), GameError> {
        self.exchange(
            "MakeResourcePortTrade",
            Exchange::ResourcePort,
            player,
            given,
            requested,
        )
    }

    fn exchange(
        &mut self,
        command: &'static str,
        kind: Exchange,
        player: &str,
        given: ResourceBundle,
        requested: ResourceBundle,
    ) -> Result<(), GameError> {
        let seat = self.ensure_turn(command, player, &[Phase::Regular])?;
        validate_exchange(kind, &self.players[seat], &self.config, &given, &requested)?;
        self.players[seat].remove_resources(&given)?;
        self.players[seat].add_resources(&requested);
        self.stats.record_exchange(seat, None, &given, &requested);
        log::debug!("{player} exchanged {given} for {requested} ({kind:?})");
        Ok(())
    }
}
