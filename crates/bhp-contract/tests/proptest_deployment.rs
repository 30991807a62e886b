use proptest::prelude::*;

use bhp_contract::{DeploymentScript, DescriptionProperties, FunctionProperties};
use bhp_primitives::fixed8::Fixed8;
use bhp_script::{ContractParameterType, ScriptHash};

fn script(avm: Vec<u8>, storage: bool, dynamic: bool, payable: bool) -> DeploymentScript {
    DeploymentScript::new(
        avm,
        FunctionProperties {
            parameter_types: vec![ContractParameterType::ByteArray],
            return_type: ContractParameterType::ByteArray,
            needs_storage: storage,
            needs_dynamic_invoke: dynamic,
            is_payable: payable,
        },
        DescriptionProperties::default(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn script_ends_with_the_create_syscall(
        avm in prop::collection::vec(any::<u8>(), 1..512),
        storage in any::<bool>(),
        dynamic in any::<bool>()
    ) {
        let bytes = script(avm, storage, dynamic, false).to_script_bytes().unwrap();
        // SYSCALL, length-prefixed "Bhp.Contract.Create".
        let mut suffix = vec![0x68, 19];
        suffix.extend_from_slice(b"Bhp.Contract.Create");
        prop_assert!(bytes.ends_with(&suffix));
    }

    #[test]
    fn contract_hash_comes_from_the_binary_alone(
        avm in prop::collection::vec(any::<u8>(), 1..128),
        storage in any::<bool>(),
        payable in any::<bool>()
    ) {
        let deployment = script(avm.clone(), storage, false, payable);
        prop_assert_eq!(deployment.contract_script_hash(), ScriptHash::from_script(&avm));
    }

    #[test]
    fn system_fee_ignores_payable(
        avm in prop::collection::vec(any::<u8>(), 1..64),
        storage in any::<bool>(),
        dynamic in any::<bool>()
    ) {
        let plain = script(avm.clone(), storage, dynamic, false).deployment_system_fee();
        let payable = script(avm, storage, dynamic, true).deployment_system_fee();
        prop_assert_eq!(plain, payable);

        // Surcharges only ever raise the fee above the base.
        prop_assert!(plain >= Fixed8::from_int(90).unwrap());
    }
}
