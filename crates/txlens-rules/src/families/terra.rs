//! Rules for Terra Classic style chains (`columbus-5`, `bombay-12`, `localterra`).

use txlens_types::{EventKind, RawMessage};

use crate::{ActionRule, Matcher, MessagePredicate, RuleSetError, Source};

fn is_cw20_transfer(message: &RawMessage) -> bool {
	matches!(message, RawMessage::ExecuteContract(msg) if msg.entry_point() == Some("transfer"))
}

fn is_cw20_send(message: &RawMessage) -> bool {
	matches!(message, RawMessage::ExecuteContract(msg) if msg.entry_point() == Some("send"))
}

const CW20_TRANSFER: MessagePredicate = MessagePredicate::new("cw20_transfer", is_cw20_transfer);
const CW20_SEND: MessagePredicate = MessagePredicate::new("cw20_send", is_cw20_send);

/// Builds the Terra rule set, most specific rule first within each tag.
pub fn rules() -> Result<Vec<ActionRule>, RuleSetError> {
	let mut rules = Vec::new();
	rules.extend(bank()?);
	rules.extend(staking()?);
	rules.extend(distribution()?);
	rules.extend(market()?);
	rules.extend(gov()?);
	rules.extend(wasm()?);
	rules.extend(oracle()?);
	rules.extend(authz()?);
	Ok(rules)
}

fn bank() -> Result<Vec<ActionRule>, RuleSetError> {
	Ok(vec![
		ActionRule::builder("bank/MsgSend")
			.matching(Matcher::event(EventKind::Transfer).with_attribute("amount"))
			.address("from", Source::message("/from_address"))
			.address("to", Source::message("/to_address"))
			.coins("amount", Source::event(EventKind::Transfer, "amount"))
			.line("{{ from }} sent {{ amount }} to {{ to }}")
			.build()?,
		ActionRule::builder("bank/MsgSend")
			.address("from", Source::message("/from_address"))
			.address("to", Source::message("/to_address"))
			.coins("amount", Source::message("/amount"))
			.line("{{ from }} sent {{ amount }} to {{ to }}")
			.build()?,
		ActionRule::builder("bank/MsgMultiSend")
			.address("from", Source::message("/inputs/0/address"))
			.coins("amount", Source::message("/inputs/0/coins"))
			.line("{{ from }} sent {{ amount }} to multiple recipients")
			.build()?,
	])
}

fn staking() -> Result<Vec<ActionRule>, RuleSetError> {
	Ok(vec![
		ActionRule::builder("staking/MsgDelegate")
			.address("delegator", Source::message("/delegator_address"))
			.address("validator", Source::message("/validator_address"))
			.coins("amount", Source::message("/amount"))
			.line("{{ delegator }} delegated {{ amount }} to {{ validator }}")
			.build()?,
		ActionRule::builder("staking/MsgUndelegate")
			.matching(Matcher::event(EventKind::Unbond).with_attribute("completion_time"))
			.address("delegator", Source::message("/delegator_address"))
			.address("validator", Source::message("/validator_address"))
			.coins("amount", Source::message("/amount"))
			.text("completion", Source::event(EventKind::Unbond, "completion_time"))
			.line("{{ delegator }} undelegated {{ amount }} from {{ validator }}")
			.line("Unbonding completes at {{ completion }}")
			.build()?,
		ActionRule::builder("staking/MsgUndelegate")
			.address("delegator", Source::message("/delegator_address"))
			.address("validator", Source::message("/validator_address"))
			.coins("amount", Source::message("/amount"))
			.line("{{ delegator }} undelegated {{ amount }} from {{ validator }}")
			.build()?,
		ActionRule::builder("staking/MsgBeginRedelegate")
			.address("delegator", Source::message("/delegator_address"))
			.address("source", Source::message("/validator_src_address"))
			.address("destination", Source::message("/validator_dst_address"))
			.coins("amount", Source::message("/amount"))
			.line("{{ delegator }} redelegated {{ amount }} from {{ source }} to {{ destination }}")
			.build()?,
	])
}

fn distribution() -> Result<Vec<ActionRule>, RuleSetError> {
	Ok(vec![
		ActionRule::builder("distribution/MsgWithdrawDelegationReward")
			.matching(Matcher::event(EventKind::WithdrawRewards).with_attribute("amount"))
			.address("delegator", Source::message("/delegator_address"))
			.address("validator", Source::message("/validator_address"))
			.coins("amount", Source::event(EventKind::WithdrawRewards, "amount"))
			.line("{{ delegator }} withdrew {{ amount }} in rewards from {{ validator }}")
			.build()?,
		ActionRule::builder("distribution/MsgWithdrawDelegationReward")
			.address("delegator", Source::message("/delegator_address"))
			.address("validator", Source::message("/validator_address"))
			.line("{{ delegator }} withdrew rewards from {{ validator }}")
			.build()?,
		ActionRule::builder("distribution/MsgWithdrawValidatorCommission")
			.matching(Matcher::event(EventKind::WithdrawCommission).with_attribute("amount"))
			.address("validator", Source::message("/validator_address"))
			.coins("amount", Source::event(EventKind::WithdrawCommission, "amount"))
			.line("{{ validator }} withdrew {{ amount }} in commission")
			.build()?,
		ActionRule::builder("distribution/MsgWithdrawValidatorCommission")
			.address("validator", Source::message("/validator_address"))
			.line("{{ validator }} withdrew commission")
			.build()?,
		ActionRule::builder("distribution/MsgModifyWithdrawAddress")
			.address("delegator", Source::message("/delegator_address"))
			.address("withdraw", Source::message("/withdraw_address"))
			.line("{{ delegator }} set withdraw address to {{ withdraw }}")
			.build()?,
	])
}

fn market() -> Result<Vec<ActionRule>, RuleSetError> {
	Ok(vec![
		ActionRule::builder("market/MsgSwap")
			.matching(Matcher::event(EventKind::Swap).with_attribute("swap_coin"))
			.address("trader", Source::message("/trader"))
			.coins("offer", Source::message("/offer_coin"))
			.coins("received", Source::event(EventKind::Swap, "swap_coin"))
			.line("{{ trader }} swapped {{ offer }} for {{ received }}")
			.build()?,
		ActionRule::builder("market/MsgSwap")
			.address("trader", Source::message("/trader"))
			.coins("offer", Source::message("/offer_coin"))
			.text("ask", Source::message("/ask_denom"))
			.line("{{ trader }} swapped {{ offer }} for {{ ask }}")
			.build()?,
		ActionRule::builder("market/MsgSwapSend")
			.matching(Matcher::event(EventKind::Swap).with_attribute("swap_coin"))
			.address("from", Source::message("/from_address"))
			.address("to", Source::message("/to_address"))
			.coins("offer", Source::message("/offer_coin"))
			.coins("received", Source::event(EventKind::Swap, "swap_coin"))
			.line("{{ from }} swapped {{ offer }} and sent {{ received }} to {{ to }}")
			.build()?,
		ActionRule::builder("market/MsgSwapSend")
			.address("from", Source::message("/from_address"))
			.address("to", Source::message("/to_address"))
			.coins("offer", Source::message("/offer_coin"))
			.text("ask", Source::message("/ask_denom"))
			.line("{{ from }} swapped {{ offer }} for {{ ask }} and sent it to {{ to }}")
			.build()?,
	])
}

fn gov() -> Result<Vec<ActionRule>, RuleSetError> {
	Ok(vec![
		ActionRule::builder("gov/MsgVote")
			.address("voter", Source::message("/voter"))
			.label("option", Source::message("/option"))
			.text("proposal", Source::message("/proposal_id"))
			.line("{{ voter }} voted {{ option }} on proposal {{ proposal }}")
			.build()?,
		ActionRule::builder("gov/MsgDeposit")
			.address("depositor", Source::message("/depositor"))
			.coins("amount", Source::message("/amount"))
			.text("proposal", Source::message("/proposal_id"))
			.line("{{ depositor }} deposited {{ amount }} to proposal {{ proposal }}")
			.build()?,
		ActionRule::builder("gov/MsgSubmitProposal")
			.matching(Matcher::event(EventKind::SubmitProposal).with_attribute("proposal_id"))
			.address("proposer", Source::message("/proposer"))
			.text("proposal", Source::event(EventKind::SubmitProposal, "proposal_id"))
			.text("title", Source::message("/content/value/title"))
			.coins("deposit", Source::message("/initial_deposit"))
			.line("{{ proposer }} submitted proposal {{ proposal }}: {{ title }}")
			.line("Initial deposit {{ deposit }}")
			.build()?,
		ActionRule::builder("gov/MsgSubmitProposal")
			.address("proposer", Source::message("/proposer"))
			.text("title", Source::message("/content/value/title"))
			.line("{{ proposer }} submitted proposal {{ title }}")
			.build()?,
	])
}

fn wasm() -> Result<Vec<ActionRule>, RuleSetError> {
	Ok(vec![
		ActionRule::builder("wasm/MsgExecuteContract")
			.canonical("wasm/transfer-token")
			.matching(Matcher::Message(CW20_TRANSFER))
			.address("sender", Source::message("/sender"))
			.address("token", Source::message("/contract"))
			.text("amount", Source::message("/execute_msg/transfer/amount"))
			.address("recipient", Source::message("/execute_msg/transfer/recipient"))
			.line("{{ sender }} transferred {{ amount }} of token {{ token }} to {{ recipient }}")
			.build()?,
		ActionRule::builder("wasm/MsgExecuteContract")
			.canonical("wasm/send-token")
			.matching(Matcher::Message(CW20_SEND))
			.address("sender", Source::message("/sender"))
			.address("token", Source::message("/contract"))
			.text("amount", Source::message("/execute_msg/send/amount"))
			.address("recipient", Source::message("/execute_msg/send/contract"))
			.line("{{ sender }} sent {{ amount }} of token {{ token }} to contract {{ recipient }}")
			.build()?,
		ActionRule::builder("wasm/MsgExecuteContract")
			.canonical("wasm/execute-contract")
			.address("sender", Source::message("/sender"))
			.address("contract", Source::message("/contract"))
			.text("entry", Source::key_of("/execute_msg"))
			.coins("coins", Source::message("/coins"))
			.line("{{ sender }} executed {{ entry }} on {{ contract }}")
			.build()?,
		ActionRule::builder("wasm/MsgInstantiateContract")
			.matching(
				Matcher::event(EventKind::InstantiateContract).with_attribute("contract_address"),
			)
			.address("sender", Source::message("/sender"))
			.address("contract", Source::event(EventKind::InstantiateContract, "contract_address"))
			.text("code", Source::message("/code_id"))
			.line("{{ sender }} instantiated contract {{ contract }} from code {{ code }}")
			.build()?,
		ActionRule::builder("wasm/MsgInstantiateContract")
			.address("sender", Source::message("/sender"))
			.text("code", Source::message("/code_id"))
			.line("{{ sender }} instantiated code {{ code }}")
			.build()?,
		ActionRule::builder("wasm/MsgStoreCode")
			.matching(Matcher::event(EventKind::StoreCode).with_attribute("code_id"))
			.address("sender", Source::message("/sender"))
			.text("code", Source::event(EventKind::StoreCode, "code_id"))
			.line("{{ sender }} stored code {{ code }}")
			.build()?,
		ActionRule::builder("wasm/MsgStoreCode")
			.address("sender", Source::message("/sender"))
			.line("{{ sender }} stored contract code")
			.build()?,
	])
}

fn oracle() -> Result<Vec<ActionRule>, RuleSetError> {
	Ok(vec![
		ActionRule::builder("oracle/MsgAggregateExchangeRateVote")
			.address("feeder", Source::message("/feeder"))
			.address("validator", Source::message("/validator"))
			.line("{{ feeder }} voted exchange rates for {{ validator }}")
			.build()?,
		ActionRule::builder("oracle/MsgAggregateExchangeRatePrevote")
			.address("feeder", Source::message("/feeder"))
			.address("validator", Source::message("/validator"))
			.line("{{ feeder }} submitted an exchange rate prevote for {{ validator }}")
			.build()?,
		ActionRule::builder("oracle/MsgDelegateFeedConsent")
			.address("operator", Source::message("/operator"))
			.address("delegate", Source::message("/delegate"))
			.line("{{ operator }} delegated price feeding to {{ delegate }}")
			.build()?,
	])
}

fn authz() -> Result<Vec<ActionRule>, RuleSetError> {
	Ok(vec![ActionRule::builder("msgauth/MsgExecAuthorized")
		.address("grantee", Source::message("/grantee"))
		.text("inner", Source::message("/msgs/0/type"))
		.line("{{ grantee }} executed authorized {{ inner }}")
		.build()?])
}
