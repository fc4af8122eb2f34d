#![no_main]

use arbitrary::Arbitrary;
use haven_core::{CallContext, ErrorCode, Identity};
use haven_ledger::{Genesis, InsuranceContract, WalletBalances};
use libfuzzer_sys::fuzz_target;

const CALLERS: [&str; 3] = ["owner", "0x123", "0x456"];

#[derive(Debug, Arbitrary)]
enum Op {
    Buy { caller: u8, advance: u16 },
    Claim { caller: u8, advance: u16 },
    Fund { caller: u8, amount: u32 },
    SetFee { caller: u8, fee: u32 },
    SetClaim { caller: u8, amount: u32 },
    Withdraw { caller: u8, amount: u32 },
}

fn identity(index: u8) -> Identity {
    Identity::new(CALLERS[index as usize % CALLERS.len()])
}

fuzz_target!(|input: (u32, Vec<Op>)| {
    let (initial, ops) = input;
    let mut contract = InsuranceContract::new(Genesis {
        initial_treasury: initial as u64,
        ..Genesis::new("owner")
    });
    let wallets = WalletBalances::new()
        .with("owner", u64::MAX)
        .with("0x123", 50_000);
    let mut height = 0u64;

    for op in ops {
        let before = contract.get_contract_balance();
        match op {
            Op::Buy { caller, advance } => {
                height += advance as u64;
                let _ = contract.buy_insurance(&CallContext::new(identity(caller), height), &wallets);
            }
            Op::Claim { caller, advance } => {
                height += advance as u64;
                let who = identity(caller);
                let was_claimed = contract.has_filed_claim(&who);
                let result = contract.file_claim(&CallContext::new(who.clone(), height));
                if was_claimed && contract.has_valid_policy(&who, height) {
                    // A claimed, still-valid policy never pays twice
                    assert_eq!(result, Err(ErrorCode::ClaimNotEligible));
                }
                if result.is_err() {
                    assert_eq!(contract.get_contract_balance(), before);
                }
            }
            Op::Fund { caller, amount } => {
                if contract
                    .fund_treasury(&identity(caller), amount as u64, &wallets)
                    .is_err()
                {
                    assert_eq!(contract.get_contract_balance(), before);
                }
            }
            Op::SetFee { caller, fee } => {
                let _ = contract.update_insurance_fee(&identity(caller), fee as u64);
            }
            Op::SetClaim { caller, amount } => {
                let _ = contract.update_claim_amount(&identity(caller), amount as u64);
            }
            Op::Withdraw { caller, amount } => {
                if contract.withdraw_excess_funds(&identity(caller), amount as u64).is_err() {
                    assert_eq!(contract.get_contract_balance(), before);
                }
            }
        }

        assert!(contract.treasury().is_balanced());
    }
});
