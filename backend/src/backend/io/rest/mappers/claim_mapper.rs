use shared::{
    AmountListKind, CarryForwardResponse, DailyViewResponse, SaveClaimRequest, StaffEntryPayload,
    UpdateFiguresRequest,
};

use crate::backend::domain::commands::claims::{
    DailyViewResult, SaveClaimCommand, UpdateFiguresCommand,
};
use crate::backend::domain::models::{
    format_claim_date, AmountList, DailyClaim, FigureUpdate, RawDailyClaim, RawStaffEntry,
    StaffEntry,
};
use crate::backend::domain::{
    BalanceVerdict, CarryForward, DailySummary, StaffCalculation,
};

pub struct ClaimMapper;

impl ClaimMapper {
    pub fn staff_entry_to_dto(domain: &StaffEntry) -> shared::StaffEntry {
        shared::StaffEntry {
            id: domain.id.clone(),
            staff_name: domain.staff_name.clone(),
            agent_parcels: domain.agent_parcels.clone(),
            additional_balance_only: domain.additional_balance_only.clone(),
            additional_today_wins: domain.additional_today_wins.clone(),
            previous_balance: domain.previous_balance,
            mail_amount: domain.mail_amount,
            return_claims: domain.return_claims,
            actual_closing_balance: domain.actual_closing_balance,
        }
    }

    pub fn claim_to_dto(domain: &DailyClaim) -> shared::DailyClaim {
        shared::DailyClaim {
            date: domain.date_key(),
            target_amount: domain.target_amount,
            staff_entries: domain
                .staff_entries
                .iter()
                .map(Self::staff_entry_to_dto)
                .collect(),
            updated_at: domain.updated_at.map(|t| t.to_rfc3339()),
        }
    }

    /// Loose client payload to the raw record the normalizer accepts
    pub fn payload_to_raw(dto: StaffEntryPayload) -> RawStaffEntry {
        RawStaffEntry {
            id: dto.id,
            staff_name: dto.staff_name,
            agent_parcels: dto.agent_parcels,
            additional_balance_only: dto.additional_balance_only,
            additional_scans: dto.additional_scans,
            additional_today_wins: dto.additional_today_wins,
            previous_balance: dto.previous_balance,
            mail_amount: dto.mail_amount,
            return_claims: dto.return_claims,
            actual_closing_balance: dto.actual_closing_balance,
            closing_balance: dto.closing_balance,
        }
    }

    pub fn save_request_to_command(dto: SaveClaimRequest) -> SaveClaimCommand {
        let date = dto.date.unwrap_or_default();
        SaveClaimCommand {
            claim: RawDailyClaim {
                date: None,
                target_amount: dto.target_amount,
                total_agent_claim: dto.total_agent_claim,
                staff_entries: dto
                    .staff_entries
                    .into_iter()
                    .map(Self::payload_to_raw)
                    .collect(),
                updated_at: None,
            },
            date,
        }
    }

    pub fn list_to_domain(dto: AmountListKind) -> AmountList {
        match dto {
            AmountListKind::AgentParcels => AmountList::AgentParcels,
            AmountListKind::AdditionalBalanceOnly => AmountList::AdditionalBalanceOnly,
            AmountListKind::AdditionalTodayWins => AmountList::AdditionalTodayWins,
        }
    }

    pub fn figures_request_to_command(dto: UpdateFiguresRequest) -> UpdateFiguresCommand {
        UpdateFiguresCommand {
            date: dto.date,
            entry_id: dto.entry_id,
            figures: FigureUpdate {
                previous_balance: dto.previous_balance,
                mail_amount: dto.mail_amount,
                return_claims: dto.return_claims,
                actual_closing_balance: dto.actual_closing_balance,
            },
        }
    }

    pub fn calculation_to_dto(domain: &StaffCalculation) -> shared::StaffCalculation {
        shared::StaffCalculation {
            entry_id: domain.entry_id.clone(),
            staff_name: domain.staff_name.clone(),
            agent_sum: domain.agent_sum,
            extra_sum: domain.extra_sum,
            today_sum: domain.today_sum,
            wins_for_balance: domain.wins_for_balance,
            predicted_closing: domain.predicted_closing,
            balance_diff: domain.balance_diff,
            assigned_scanned: domain.assigned_scanned,
            is_reconciled: domain.is_reconciled(),
        }
    }

    pub fn verdict_to_dto(domain: BalanceVerdict) -> shared::BalanceVerdict {
        match domain {
            BalanceVerdict::TargetNotSet => shared::BalanceVerdict::TargetNotSet,
            BalanceVerdict::Balanced => shared::BalanceVerdict::Balanced,
            BalanceVerdict::Mismatch => shared::BalanceVerdict::Mismatch,
        }
    }

    pub fn summary_to_dto(domain: &DailySummary) -> shared::DailySummary {
        shared::DailySummary {
            target_amount: domain.target_amount,
            total_assigned_scanned: domain.total_assigned_scanned,
            difference: domain.difference,
            is_balanced: domain.is_balanced,
            verdict: Self::verdict_to_dto(domain.verdict),
        }
    }

    pub fn carry_forward_to_dto(domain: CarryForward) -> CarryForwardResponse {
        CarryForwardResponse {
            date: domain.date,
            source_date: domain.source_date.map(format_claim_date),
            totals: domain.totals,
        }
    }

    pub fn daily_view_to_dto(domain: DailyViewResult) -> DailyViewResponse {
        DailyViewResponse {
            date: domain.claim.date_key(),
            claim_exists: domain.exists,
            claim: Self::claim_to_dto(&domain.claim),
            calculations: domain
                .calculations
                .iter()
                .map(Self::calculation_to_dto)
                .collect(),
            summary: Self::summary_to_dto(&domain.summary),
            carry_forward: Self::carry_forward_to_dto(domain.carry_forward),
        }
    }
}
