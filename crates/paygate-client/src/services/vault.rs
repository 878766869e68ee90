//! # Customer Vault Service
//!
//! Stored profiles with their nested addresses and cards, under
//! `/customervault/v1/profiles/…`. Vault paths do not carry the merchant
//! account number; profile ids scope everything.

use crate::services::monitor_ready;
use crate::transport::{ApiRequest, SharedTransport};
use paygate_core::{Address, Card, Entity, GatewayResult, Profile, RequestRules};
use tracing::{debug, info};

/// Client for the customer vault product line
pub struct CustomerVaultService {
    transport: SharedTransport,
}

impl CustomerVaultService {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    fn profile_rules() -> RequestRules {
        RequestRules::new()
            .require(&["merchantCustomerId", "locale"])
            .optional(&["firstName", "lastName", "email", "phone"])
    }

    // =========================================================================
    // Profiles
    // =========================================================================

    /// Store a new customer profile.
    ///
    /// Requires `merchantCustomerId` and `locale`.
    pub async fn create_profile(&self, profile: &Profile) -> GatewayResult<Profile> {
        Self::profile_rules().validate(profile.container())?;

        info!("creating vault profile");
        let request = ApiRequest::post("/customervault/v1/profiles", profile.to_json());
        let map = self.transport.execute(&request).await?;
        Profile::from_json(&map)
    }

    /// Look up a profile by gateway id
    pub async fn get_profile(&self, id: &str) -> GatewayResult<Profile> {
        debug!("fetching vault profile {}", id);
        let request = ApiRequest::get(format!("/customervault/v1/profiles/{id}"));
        let map = self.transport.execute(&request).await?;
        Profile::from_json(&map)
    }

    /// Replace a stored profile.
    ///
    /// The same field requirements as [`create_profile`](Self::create_profile)
    /// apply; the gateway treats the update as a full replacement.
    pub async fn update_profile(&self, id: &str, profile: &Profile) -> GatewayResult<Profile> {
        Self::profile_rules().validate(profile.container())?;

        info!("updating vault profile {}", id);
        let request = ApiRequest::put(format!("/customervault/v1/profiles/{id}"), profile.to_json());
        let map = self.transport.execute(&request).await?;
        Profile::from_json(&map)
    }

    /// Delete a profile and everything stored under it
    pub async fn delete_profile(&self, id: &str) -> GatewayResult<()> {
        info!("deleting vault profile {}", id);
        let request = ApiRequest::delete(format!("/customervault/v1/profiles/{id}"));
        self.transport.execute(&request).await?;
        Ok(())
    }

    // =========================================================================
    // Addresses
    // =========================================================================

    /// Add an address to a profile.
    ///
    /// Requires `country` and `zip`.
    pub async fn create_address(&self, profile_id: &str, address: &Address) -> GatewayResult<Address> {
        RequestRules::new()
            .require(&["country", "zip"])
            .validate(address.container())?;

        info!("adding address to profile {}", profile_id);
        let request = ApiRequest::post(
            format!("/customervault/v1/profiles/{profile_id}/addresses"),
            address.to_json(),
        );
        let map = self.transport.execute(&request).await?;
        Address::from_json(&map)
    }

    /// Look up an address stored on a profile
    pub async fn get_address(&self, profile_id: &str, id: &str) -> GatewayResult<Address> {
        debug!("fetching address {} on profile {}", id, profile_id);
        let request =
            ApiRequest::get(format!("/customervault/v1/profiles/{profile_id}/addresses/{id}"));
        let map = self.transport.execute(&request).await?;
        Address::from_json(&map)
    }

    /// Replace an address stored on a profile
    pub async fn update_address(
        &self,
        profile_id: &str,
        id: &str,
        address: &Address,
    ) -> GatewayResult<Address> {
        RequestRules::new()
            .require(&["country", "zip"])
            .validate(address.container())?;

        info!("updating address {} on profile {}", id, profile_id);
        let request = ApiRequest::put(
            format!("/customervault/v1/profiles/{profile_id}/addresses/{id}"),
            address.to_json(),
        );
        let map = self.transport.execute(&request).await?;
        Address::from_json(&map)
    }

    /// Remove an address from a profile
    pub async fn delete_address(&self, profile_id: &str, id: &str) -> GatewayResult<()> {
        info!("deleting address {} on profile {}", id, profile_id);
        let request =
            ApiRequest::delete(format!("/customervault/v1/profiles/{profile_id}/addresses/{id}"));
        self.transport.execute(&request).await?;
        Ok(())
    }

    // =========================================================================
    // Cards
    // =========================================================================

    /// Store a card on a profile.
    ///
    /// Requires `cardNum` and `cardExpiry`.
    pub async fn create_card(&self, profile_id: &str, card: &Card) -> GatewayResult<Card> {
        RequestRules::new()
            .require(&["cardNum", "cardExpiry"])
            .validate(card.container())?;

        info!("adding card to profile {}", profile_id);
        let request = ApiRequest::post(
            format!("/customervault/v1/profiles/{profile_id}/cards"),
            card.to_json(),
        );
        let map = self.transport.execute(&request).await?;
        Card::from_json(&map)
    }

    /// Look up a card stored on a profile
    pub async fn get_card(&self, profile_id: &str, id: &str) -> GatewayResult<Card> {
        debug!("fetching card {} on profile {}", id, profile_id);
        let request = ApiRequest::get(format!("/customervault/v1/profiles/{profile_id}/cards/{id}"));
        let map = self.transport.execute(&request).await?;
        Card::from_json(&map)
    }

    /// Replace a card stored on a profile.
    ///
    /// The card number itself cannot change; only the expiry and metadata.
    pub async fn update_card(&self, profile_id: &str, id: &str, card: &Card) -> GatewayResult<Card> {
        RequestRules::new()
            .require(&["cardExpiry"])
            .validate(card.container())?;

        info!("updating card {} on profile {}", id, profile_id);
        let request = ApiRequest::put(
            format!("/customervault/v1/profiles/{profile_id}/cards/{id}"),
            card.to_json(),
        );
        let map = self.transport.execute(&request).await?;
        Card::from_json(&map)
    }

    /// Remove a card from a profile
    pub async fn delete_card(&self, profile_id: &str, id: &str) -> GatewayResult<()> {
        info!("deleting card {} on profile {}", id, profile_id);
        let request =
            ApiRequest::delete(format!("/customervault/v1/profiles/{profile_id}/cards/{id}"));
        self.transport.execute(&request).await?;
        Ok(())
    }

    // =========================================================================
    // Monitor
    // =========================================================================

    /// True iff the customer vault API reports itself ready
    pub async fn monitor(&self) -> GatewayResult<bool> {
        let request = ApiRequest::get("/customervault/monitor");
        let map = self.transport.execute(&request).await?;
        Ok(monitor_ready(&map))
    }
}
