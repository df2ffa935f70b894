//! CLI tool for deploying and interacting with the liquid staking contracts.

use lsm_contracts::liquid::hub::LiquidStakingHub;
use lsm_contracts::liquid::share_token::TokenizeShareToken;
use odra::prelude::{Address, Addressable};
use odra::host::HostEnv;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Deploys the receipt token contract.
pub struct ShareTokenDeployScript;

impl DeployScript for ShareTokenDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use lsm_contracts::liquid::share_token::TokenizeShareTokenInitArgs;

        // The hub does not exist yet; it is wired in by the hub script
        let caller = env.caller();
        let _token = TokenizeShareToken::load_or_deploy(
            &env,
            TokenizeShareTokenInitArgs {
                hub: caller,
            },
            container,
            300_000_000_000 // Gas limit for token deployment
        )?;

        Ok(())
    }
}

/// Deploys the liquid staking hub and points the receipt token at it.
/// Requires the receipt token to be deployed first.
pub struct HubDeployScript;

impl DeployScript for HubDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use lsm_contracts::liquid::hub::LiquidStakingHubInitArgs;

        let mut token = container.contract_ref::<TokenizeShareToken>(env)?;
        let token_address = token.address().clone();

        let hub = LiquidStakingHub::load_or_deploy(
            &env,
            LiquidStakingHubInitArgs {
                share_token: token_address,
            },
            container,
            500_000_000_000 // Gas limit for hub deployment
        )?;

        env.set_gas(5_000_000_000);
        token.set_hub(hub.address().clone());

        Ok(())
    }
}

/// Deploys the complete module (receipt token + hub).
pub struct LiquidStakingDeployScript;

impl DeployScript for LiquidStakingDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        ShareTokenDeployScript.deploy(env, container)?;
        HubDeployScript.deploy(env, container)?;

        Ok(())
    }
}

/// Scenario to register a validator on the hub.
pub struct AddValidatorScenario;

impl Scenario for AddValidatorScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "validator",
                "Operator address of the validator to register",
                NamedCLType::Key,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut hub = container.contract_ref::<LiquidStakingHub>(env)?;
        let validator = args.get_single::<Address>("validator")?;

        env.set_gas(10_000_000_000);
        hub.try_add_validator(validator)?;

        println!("Validator registered successfully!");
        Ok(())
    }
}

impl ScenarioMetadata for AddValidatorScenario {
    const NAME: &'static str = "add-validator";
    const DESCRIPTION: &'static str = "Registers a validator with the liquid staking hub";
}

/// Scenario to drain matured tokenize share locks.
pub struct DrainUnlockQueueScenario;

impl Scenario for DrainUnlockQueueScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let mut hub = container.contract_ref::<LiquidStakingHub>(env)?;

        env.set_gas(20_000_000_000);
        let unlocked = hub.try_remove_expired_share_locks()?;

        println!("Unlocked {} account(s)", unlocked.len());
        Ok(())
    }
}

impl ScenarioMetadata for DrainUnlockQueueScenario {
    const NAME: &'static str = "drain-unlock-queue";
    const DESCRIPTION: &'static str = "Removes tokenize share locks whose unlock time has passed";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the Casper liquid staking module")
        // Deploy scripts
        .deploy(ShareTokenDeployScript)
        .deploy(HubDeployScript)
        .deploy(LiquidStakingDeployScript)
        // Contract references
        .contract::<LiquidStakingHub>()
        .contract::<TokenizeShareToken>()
        // Scenarios
        .scenario(AddValidatorScenario)
        .scenario(DrainUnlockQueueScenario)
        .build()
        .run();
}
