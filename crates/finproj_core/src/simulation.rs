use jiff::civil::Date;

use crate::apply::{EventSchedule, YearlyGrowth};
use crate::config::ProjectionInput;
use crate::error::Result;
use crate::model::{
    AccountBalancesPoint, CashFlowPoint, DebtPayoffPoint, ProjectionResponse, ProjectionSummary,
    ValuePoint,
};
use crate::simulation_state::SimulationState;
use crate::taxes::{TaxSchedule, monthly_tax};

/// Run a projection, starting today when the input has no start date
pub fn project(input: &ProjectionInput) -> Result<ProjectionResponse> {
    project_from(input, input.config.resolved_start_date())
}

/// Run a projection from an explicit start date.
///
/// Validation happens up front; once the monthly loop starts the run always
/// completes.
pub fn project_from(input: &ProjectionInput, start_date: Date) -> Result<ProjectionResponse> {
    input.validate_from(start_date)?;

    let config = &input.config;
    let federal = TaxSchedule::new(&config.federal_tax_brackets, "federal_tax_brackets")?;
    let provincial = TaxSchedule::new(&config.provincial_tax_brackets, "provincial_tax_brackets")?;

    let mut state = SimulationState::from_input(input, start_date);
    let schedule = EventSchedule::new(&config.events, &state.timeline.dates);
    let growth = YearlyGrowth {
        salary: config.annual_salary_growth,
        expenses: config.annual_expense_growth,
    };
    let months = config.months();

    tracing::debug!(
        %start_date,
        months,
        accounts = state.portfolio.accounts.len(),
        debts = state.debts.len(),
        events = config.events.len(),
        "starting projection"
    );

    let mut series = SeriesRecorder::new(months + 1, config.inflation_rate);
    series.record(&state, CashFlowPoint::empty(start_date));

    for step in 1..=months {
        let date = state.timeline.dates[step];

        // First month of each new simulated year
        let anniversary = step > 1 && (step - 1) % 12 == 0;
        let params = schedule.resolve(step, &mut state.baseline, anniversary.then_some(growth));

        let gross_income = params.annual_salary / 12.0 + params.one_time_income;
        let taxes = monthly_tax(gross_income, &federal, &provincial);
        let income = gross_income - taxes;

        let debt_payments = state.pay_debts(&params, date);
        let expenses = params.monthly_expenses + params.one_time_expenses + debt_payments;
        let net = income - expenses;

        let savings = if net > 0.0 {
            state.invest(net * params.savings_rate)
        } else {
            0.0
        };
        state.adjust_cash(net - savings);
        state.grow_accounts();
        state.totals.taxes += taxes;

        tracing::trace!(
            step,
            %date,
            gross_income,
            taxes,
            expenses,
            net,
            savings,
            cash = state.cash_balance(),
            "month simulated"
        );

        series.record(
            &state,
            CashFlowPoint {
                date,
                gross_income,
                taxes,
                income,
                expenses,
                savings,
                net,
            },
        );
    }

    let response = series.finish(&state);
    tracing::debug!(
        final_net_worth = response.summary.final_net_worth,
        debt_free_date = ?response.summary.debt_free_date,
        "projection finished"
    );
    Ok(response)
}

/// Accumulates the output series, one point per recorded month
struct SeriesRecorder {
    inflation_rate: f64,
    net_worth: Vec<ValuePoint>,
    real_net_worth: Vec<ValuePoint>,
    assets: Vec<ValuePoint>,
    liabilities: Vec<ValuePoint>,
    cash_flow: Vec<CashFlowPoint>,
    debt_payoff: Vec<DebtPayoffPoint>,
    account_balances: Vec<AccountBalancesPoint>,
}

impl SeriesRecorder {
    fn new(capacity: usize, inflation_rate: f64) -> Self {
        Self {
            inflation_rate,
            net_worth: Vec::with_capacity(capacity),
            real_net_worth: Vec::with_capacity(capacity),
            assets: Vec::with_capacity(capacity),
            liabilities: Vec::with_capacity(capacity),
            cash_flow: Vec::with_capacity(capacity),
            debt_payoff: Vec::with_capacity(capacity),
            account_balances: Vec::with_capacity(capacity),
        }
    }

    fn record(&mut self, state: &SimulationState, cash_flow: CashFlowPoint) {
        let date = cash_flow.date;
        let assets = state.assets();
        let liabilities = state.liabilities();
        let net_worth = assets - liabilities;

        // Month index of this point
        let k = self.net_worth.len() as f64;
        let deflator = (1.0 + self.inflation_rate).powf(k / 12.0);

        self.net_worth.push(ValuePoint {
            date,
            value: net_worth,
        });
        self.real_net_worth.push(ValuePoint {
            date,
            value: net_worth / deflator,
        });
        self.assets.push(ValuePoint {
            date,
            value: assets,
        });
        self.liabilities.push(ValuePoint {
            date,
            value: liabilities,
        });
        self.cash_flow.push(cash_flow);
        self.debt_payoff.push(DebtPayoffPoint {
            date,
            total_debt: liabilities,
            debts: state.debt_balances(),
        });
        self.account_balances.push(AccountBalancesPoint {
            date,
            balances: state.account_balances(),
        });
    }

    fn finish(self, state: &SimulationState) -> ProjectionResponse {
        let start_date = state.timeline.start_date;
        let end_date = self.net_worth.last().map_or(start_date, |p| p.date);

        let summary = ProjectionSummary {
            start_date,
            end_date,
            final_net_worth: self.net_worth.last().map_or(0.0, |p| p.value),
            final_real_net_worth: self.real_net_worth.last().map_or(0.0, |p| p.value),
            total_taxes: state.totals.taxes,
            total_interest: state.totals.interest,
            total_invested: state.totals.invested,
            debt_free_date: state.debt_free_date(),
            debt_payoff_dates: state
                .debts
                .iter()
                .filter_map(|d| d.payoff_date.map(|date| (d.id.clone(), date)))
                .collect(),
        };

        ProjectionResponse {
            net_worth: self.net_worth,
            real_net_worth: self.real_net_worth,
            assets: self.assets,
            liabilities: self.liabilities,
            cash_flow: self.cash_flow,
            debt_payoff: self.debt_payoff,
            account_balances: self.account_balances,
            summary,
        }
    }
}
