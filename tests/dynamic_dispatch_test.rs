use raceledger::application::acceptor::Acceptor;
use raceledger::domain::agreement::CounterpartyReply;
use raceledger::domain::party::Party;
use raceledger::domain::ports::{CounterpartyBox, LedgerBox, PartyDirectoryBox};
use raceledger::domain::result::RaceResult;
use raceledger::domain::signature::SigningIdentity;
use raceledger::domain::transaction::SignedRecord;
use raceledger::infrastructure::in_memory::{InMemoryDirectory, InMemoryLedger};

mod common;

#[tokio::test]
async fn test_ports_as_trait_objects() {
    let proposer = SigningIdentity::generate("O=PartyA,L=London,C=GB");
    let acceptor = Acceptor::new(SigningIdentity::generate(common::PARTY_B));
    let counterparty_party = acceptor.party().clone();

    let ledger: LedgerBox = Box::new(InMemoryLedger::new());
    let counterparty: CounterpartyBox = Box::new(acceptor.spawn());
    let directory: PartyDirectoryBox = Box::new(
        InMemoryDirectory::new(proposer.party().clone()).with_party(counterparty_party.clone()),
    );

    let record = RaceResult::draft(
        common::corporate_challenge(),
        proposer.party().clone(),
        counterparty_party,
    );
    let signature = proposer.sign(&record).unwrap();
    let proposal = SignedRecord::new(record).with_signature(signature);

    // Verify Send + Sync by spawning tasks
    let cp_handle = tokio::spawn(async move {
        let reply = counterparty.request_signature(proposal.clone()).await.unwrap();
        match reply {
            CounterpartyReply::Signed(signature) => proposal.with_signature(signature),
            other => panic!("expected signature, got {:?}", other),
        }
    });
    let signed = cp_handle.await.unwrap();

    let ledger_handle = tokio::spawn(async move {
        let id = ledger.commit(signed).await.unwrap();
        ledger.get(&id).await.unwrap().unwrap()
    });

    let dir_handle = tokio::spawn(async move {
        let found: Option<Party> = directory.lookup(common::PARTY_B).await.unwrap();
        (directory.me().await.unwrap(), found)
    });

    let committed = ledger_handle.await.unwrap();
    assert_eq!(committed.signed.signatures.len(), 2);
    assert_eq!(committed.record().name, "Alice");

    let (me, found) = dir_handle.await.unwrap();
    assert_eq!(me.name, "O=PartyA,L=London,C=GB");
    assert_eq!(found.unwrap().name, common::PARTY_B);
}
