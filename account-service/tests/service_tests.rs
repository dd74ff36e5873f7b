use account_service::AccountService;
use common::decimal::{dec, Amount};
use common::error::Error;
use common::model::account::{AccountPatch, AccountType, NewAccount, DEFAULT_CURRENCY};
use uuid::Uuid;

fn new_account(account_type: AccountType, balance: Amount) -> NewAccount {
    NewAccount {
        account_type,
        balance,
        currency: DEFAULT_CURRENCY.to_string(),
    }
}

#[tokio::test]
async fn test_create_account() {
    let service = AccountService::new();
    let account = service
        .create(new_account(AccountType::Current, dec!(100)))
        .await
        .unwrap();

    assert!(account.id != Uuid::nil());
    assert_eq!(account.account_type, AccountType::Current);
    assert_eq!(account.balance, dec!(100));
    assert_eq!(account.currency, "MAD");
    assert_eq!(
        account.created_at.date_naive(),
        chrono::Utc::now().date_naive()
    );
}

#[tokio::test]
async fn test_create_savings_negative_balance_rejected() {
    let service = AccountService::new();
    let result = service
        .create(new_account(AccountType::Savings, dec!(-1)))
        .await;

    match result {
        Err(Error::NegativeBalance(_)) => (),
        other => panic!("Expected NegativeBalance error, got {:?}", other.map(|a| a.id)),
    }

    // Nothing was persisted
    assert!(service.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_current_negative_balance_allowed() {
    let service = AccountService::new();
    let account = service
        .create(new_account(AccountType::Current, dec!(-250.50)))
        .await
        .unwrap();

    assert_eq!(account.balance, dec!(-250.50));
}

#[tokio::test]
async fn test_get_by_id() {
    let service = AccountService::new();
    let account = service
        .create(new_account(AccountType::Savings, dec!(50)))
        .await
        .unwrap();

    let retrieved = service.get_by_id(account.id).await.unwrap();
    assert_eq!(retrieved.id, account.id);
    assert_eq!(retrieved.balance, dec!(50));

    let missing = service.get_by_id(Uuid::new_v4()).await;
    match missing {
        Err(Error::AccountNotFound(_)) => (),
        other => panic!("Expected AccountNotFound error, got {:?}", other.map(|a| a.id)),
    }
}

#[tokio::test]
async fn test_deposit() {
    let service = AccountService::new();
    let account = service
        .create(new_account(AccountType::Current, dec!(100)))
        .await
        .unwrap();

    let updated = service.deposit(account.id, dec!(25.75)).await.unwrap();
    assert_eq!(updated.balance, dec!(125.75));
}

#[tokio::test]
async fn test_deposit_non_positive_amount() {
    let service = AccountService::new();
    let account = service
        .create(new_account(AccountType::Current, dec!(100)))
        .await
        .unwrap();

    for amount in [Amount::ZERO, dec!(-5)] {
        let result = service.deposit(account.id, amount).await;
        match result {
            Err(Error::InvalidAmount(_)) => (),
            other => panic!("Expected InvalidAmount error, got {:?}", other.map(|a| a.id)),
        }
    }

    // Balance unchanged after the rejected deposits
    let account = service.get_by_id(account.id).await.unwrap();
    assert_eq!(account.balance, dec!(100));
}

#[tokio::test]
async fn test_deposit_missing_account() {
    let service = AccountService::new();
    let result = service.deposit(Uuid::new_v4(), dec!(10)).await;

    match result {
        Err(Error::AccountNotFound(_)) => (),
        other => panic!("Expected AccountNotFound error, got {:?}", other.map(|a| a.id)),
    }
}

#[tokio::test]
async fn test_withdraw_current_success() {
    let service = AccountService::new();
    let account = service
        .create(new_account(AccountType::Current, dec!(1000)))
        .await
        .unwrap();

    let updated = service.withdraw(account.id, dec!(900)).await.unwrap();
    assert_eq!(updated.balance, dec!(100));
}

#[tokio::test]
async fn test_withdraw_insufficient_funds() {
    let service = AccountService::new();
    let account = service
        .create(new_account(AccountType::Current, dec!(1000)))
        .await
        .unwrap();

    let result = service.withdraw(account.id, dec!(1200)).await;
    match result {
        Err(Error::InsufficientFunds(_)) => (),
        other => panic!("Expected InsufficientFunds error, got {:?}", other.map(|a| a.id)),
    }

    // Balance unchanged after the rejected withdrawal
    let account = service.get_by_id(account.id).await.unwrap();
    assert_eq!(account.balance, dec!(1000));
}

#[tokio::test]
async fn test_withdraw_savings_exact_balance() {
    let service = AccountService::new();
    let account = service
        .create(new_account(AccountType::Savings, dec!(500)))
        .await
        .unwrap();

    // Withdrawing the whole balance is allowed, leaving zero
    let updated = service.withdraw(account.id, dec!(500)).await.unwrap();
    assert_eq!(updated.balance, Amount::ZERO);
}

#[tokio::test]
async fn test_withdraw_savings_over_balance_is_insufficient_funds() {
    let service = AccountService::new();
    let account = service
        .create(new_account(AccountType::Savings, dec!(500)))
        .await
        .unwrap();

    // The funds check fires before the savings rule, so this is
    // InsufficientFunds rather than NegativeBalance
    let result = service.withdraw(account.id, dec!(500.01)).await;
    match result {
        Err(Error::InsufficientFunds(_)) => (),
        other => panic!("Expected InsufficientFunds error, got {:?}", other.map(|a| a.id)),
    }
}

#[tokio::test]
async fn test_withdraw_non_positive_amount() {
    let service = AccountService::new();
    let account = service
        .create(new_account(AccountType::Savings, dec!(500)))
        .await
        .unwrap();

    for amount in [Amount::ZERO, dec!(-0.01)] {
        let result = service.withdraw(account.id, amount).await;
        match result {
            Err(Error::InvalidAmount(_)) => (),
            other => panic!("Expected InvalidAmount error, got {:?}", other.map(|a| a.id)),
        }
    }
}

#[tokio::test]
async fn test_update_partial_fields() {
    let service = AccountService::new();
    let account = service
        .create(new_account(AccountType::Current, dec!(100)))
        .await
        .unwrap();

    let updated = service
        .update(
            account.id,
            AccountPatch {
                currency: Some("EUR".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Only the supplied field changed
    assert_eq!(updated.currency, "EUR");
    assert_eq!(updated.balance, dec!(100));
    assert_eq!(updated.account_type, AccountType::Current);
    assert_eq!(updated.created_at, account.created_at);
}

#[tokio::test]
async fn test_update_savings_negative_balance_rejected() {
    let service = AccountService::new();
    let account = service
        .create(new_account(AccountType::Savings, dec!(100)))
        .await
        .unwrap();

    let result = service
        .update(
            account.id,
            AccountPatch {
                balance: Some(dec!(-10)),
                ..Default::default()
            },
        )
        .await;

    match result {
        Err(Error::NegativeBalance(_)) => (),
        other => panic!("Expected NegativeBalance error, got {:?}", other.map(|a| a.id)),
    }

    // Original balance retained
    let account = service.get_by_id(account.id).await.unwrap();
    assert_eq!(account.balance, dec!(100));
}

#[tokio::test]
async fn test_update_effective_type_validated() {
    let service = AccountService::new();

    // Switching an overdrawn current account to savings must fail even
    // without touching the balance
    let account = service
        .create(new_account(AccountType::Current, dec!(-40)))
        .await
        .unwrap();

    let result = service
        .update(
            account.id,
            AccountPatch {
                account_type: Some(AccountType::Savings),
                ..Default::default()
            },
        )
        .await;

    match result {
        Err(Error::NegativeBalance(_)) => (),
        other => panic!("Expected NegativeBalance error, got {:?}", other.map(|a| a.id)),
    }

    // The opposite direction is fine: savings to current, then negative
    let savings = service
        .create(new_account(AccountType::Savings, dec!(10)))
        .await
        .unwrap();

    let updated = service
        .update(
            savings.id,
            AccountPatch {
                account_type: Some(AccountType::Current),
                balance: Some(dec!(-10)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.account_type, AccountType::Current);
    assert_eq!(updated.balance, dec!(-10));
}

#[tokio::test]
async fn test_update_missing_account() {
    let service = AccountService::new();
    let result = service.update(Uuid::new_v4(), AccountPatch::default()).await;

    match result {
        Err(Error::AccountNotFound(_)) => (),
        other => panic!("Expected AccountNotFound error, got {:?}", other.map(|a| a.id)),
    }
}

#[tokio::test]
async fn test_delete() {
    let service = AccountService::new();
    let account = service
        .create(new_account(AccountType::Current, dec!(0)))
        .await
        .unwrap();

    service.delete(account.id).await.unwrap();

    let result = service.get_by_id(account.id).await;
    match result {
        Err(Error::AccountNotFound(_)) => (),
        other => panic!("Expected AccountNotFound error, got {:?}", other.map(|a| a.id)),
    }

    // Deleting again fails the same way
    let result = service.delete(account.id).await;
    match result {
        Err(Error::AccountNotFound(_)) => (),
        Ok(()) => panic!("Expected AccountNotFound error, got Ok"),
        Err(other) => panic!("Expected AccountNotFound error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_find_by_type() {
    let service = AccountService::new();
    let current = service
        .create(new_account(AccountType::Current, dec!(1)))
        .await
        .unwrap();
    service
        .create(new_account(AccountType::Savings, dec!(2)))
        .await
        .unwrap();

    let found = service.find_by_type(AccountType::Current).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, current.id);
}

#[tokio::test]
async fn test_find_by_balance_range() {
    let service = AccountService::new();
    for balance in [dec!(100), dec!(500), dec!(1000)] {
        service
            .create(new_account(AccountType::Current, balance))
            .await
            .unwrap();
    }

    let found = service
        .find_by_balance_range(Some(dec!(200)), Some(dec!(800)))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].balance, dec!(500));

    // Bounds are inclusive
    let found = service
        .find_by_balance_range(Some(dec!(100)), Some(dec!(500)))
        .await
        .unwrap();
    assert_eq!(found.len(), 2);

    // Either bound may be omitted
    let found = service
        .find_by_balance_range(Some(dec!(500)), None)
        .await
        .unwrap();
    assert_eq!(found.len(), 2);

    let found = service
        .find_by_balance_range(None, Some(dec!(100)))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    // Omitting both returns everything
    let found = service.find_by_balance_range(None, None).await.unwrap();
    assert_eq!(found.len(), 3);
}
