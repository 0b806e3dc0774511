use crate::domain::agreement::{CounterpartyReply, RejectReason};
use crate::domain::party::Party;
use crate::domain::ports::Counterparty;
use crate::domain::signature::SigningIdentity;
use crate::domain::transaction::SignedRecord;
use crate::domain::validation;
use crate::error::{AgreementError, Result};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Proposals queued for a spawned acceptor before senders wait.
const PROPOSAL_QUEUE_DEPTH: usize = 16;

/// The counterparty side of an agreement.
///
/// Reviews each proposal on its own terms: the record must be addressed to
/// this party, carry the proposer's signature and pass validation here,
/// whatever the proposer checked.
#[derive(Debug)]
pub struct Acceptor {
    identity: SigningIdentity,
}

impl Acceptor {
    pub fn new(identity: SigningIdentity) -> Self {
        Self { identity }
    }

    pub fn party(&self) -> &Party {
        self.identity.party()
    }

    /// Decides whether to sign `proposal`.
    pub fn review(&self, proposal: &SignedRecord) -> Result<CounterpartyReply> {
        let record = &proposal.record;

        if record.counterparty != *self.identity.party() {
            return Ok(self.reject(proposal, RejectReason::NotAddressedToMe));
        }
        if !proposal.is_signed_by(&record.proposer) {
            return Ok(self.reject(proposal, RejectReason::MissingProposerSignature));
        }
        if let Err(violation) = validation::validate(record) {
            return Ok(self.reject(proposal, RejectReason::Invalid(violation)));
        }

        let signature = self.identity.sign(record)?;
        info!(
            party = %self.identity.party(),
            linear_id = %record.linear_id,
            "signed proposal from {}",
            record.proposer
        );
        Ok(CounterpartyReply::Signed(signature))
    }

    fn reject(&self, proposal: &SignedRecord, reason: RejectReason) -> CounterpartyReply {
        warn!(
            party = %self.identity.party(),
            linear_id = %proposal.record.linear_id,
            %reason,
            "rejected proposal from {}",
            proposal.record.proposer
        );
        CounterpartyReply::Rejected(reason)
    }

    /// Runs the acceptor on its own task.
    ///
    /// The returned handle reaches it through a channel; the task stops once
    /// every handle has been dropped.
    pub fn spawn(self) -> ChannelCounterparty {
        let party = self.identity.party().clone();
        let (sender, mut receiver) = mpsc::channel::<Proposal>(PROPOSAL_QUEUE_DEPTH);

        tokio::spawn(async move {
            while let Some(Proposal { record, reply }) = receiver.recv().await {
                let outcome = self.review(&record);
                if reply.send(outcome).is_err() {
                    warn!(
                        linear_id = %record.record.linear_id,
                        "proposer went away before receiving the reply"
                    );
                }
            }
            debug!(party = %self.identity.party(), "acceptor stopped");
        });

        ChannelCounterparty { party, sender }
    }
}

#[async_trait]
impl Counterparty for Acceptor {
    fn party(&self) -> &Party {
        self.identity.party()
    }

    async fn request_signature(&self, proposal: SignedRecord) -> Result<CounterpartyReply> {
        self.review(&proposal)
    }
}

struct Proposal {
    record: SignedRecord,
    reply: oneshot::Sender<Result<CounterpartyReply>>,
}

/// Handle to an [`Acceptor`] running on its own task.
#[derive(Clone)]
pub struct ChannelCounterparty {
    party: Party,
    sender: mpsc::Sender<Proposal>,
}

#[async_trait]
impl Counterparty for ChannelCounterparty {
    fn party(&self) -> &Party {
        &self.party
    }

    async fn request_signature(&self, proposal: SignedRecord) -> Result<CounterpartyReply> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Proposal {
                record: proposal,
                reply,
            })
            .await
            .map_err(|_| AgreementError::CounterpartyUnavailable(self.party.name.clone()))?;

        response
            .await
            .map_err(|_| AgreementError::CounterpartyUnavailable(self.party.name.clone()))?
    }
}
